use serde::{Deserialize, Serialize};

/// Performance points of a play and their breakdown.
///
/// Breakdown fields are `None` when the ruleset does not produce them.
/// They serialize as `null` so consumers can tell "not applicable" apart from zero.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PerformanceRating {
    /// Always finite and non-negative, rounded to 5 decimals
    pub pp: f64,
    pub pp_acc: Option<f64>,
    pub pp_aim: Option<f64>,
    pub pp_speed: Option<f64>,
    pub pp_flashlight: Option<f64>,
    pub effective_miss_count: Option<f64>,
    pub pp_difficulty: Option<f64>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DifficultyRating {
    pub stars: f64,
    pub aim: Option<f64>,
    pub speed: Option<f64>,
    pub flashlight: Option<f64>,
    pub slider_factor: Option<f64>,
    pub speed_note_count: Option<f64>,
    pub stamina: Option<f64>,
    pub color: Option<f64>,
    pub rhythm: Option<f64>,
    pub peak: Option<f64>
}

/// Result for one input score, in input order
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct PerformanceResult {
    pub performance: PerformanceRating,
    pub difficulty: DifficultyRating
}
