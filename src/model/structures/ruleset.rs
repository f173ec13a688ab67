use serde_repr::{Deserialize_repr, Serialize_repr};
use strum_macros::EnumIter;

/// The vanilla game ruleset a beatmap is calculated under.
#[derive(Deserialize_repr, Serialize_repr, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
#[repr(u8)]
pub enum Ruleset {
    Osu = 0,
    Taiko = 1,
    Catch = 2,
    Mania = 3
}
