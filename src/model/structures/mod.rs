pub mod mode;
pub mod mods;
pub mod performance_result;
pub mod ruleset;
pub mod score_params;
