use serde::{Deserialize, Serialize};

use super::{mode::Mode, mods::Mods};

/// Per-judgement hit breakdown of a play. Fields left empty are
/// filled in by the rating engine.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HitCounts {
    #[serde(default)]
    pub n300: Option<u32>,
    #[serde(default)]
    pub n100: Option<u32>,
    #[serde(default)]
    pub n50: Option<u32>,
    #[serde(default)]
    pub ngeki: Option<u32>,
    #[serde(default)]
    pub nkatu: Option<u32>,
    #[serde(default)]
    pub nmiss: Option<u32>
}

impl HitCounts {
    pub fn is_empty(&self) -> bool {
        self.n300.is_none()
            && self.n100.is_none()
            && self.n50.is_none()
            && self.ngeki.is_none()
            && self.nkatu.is_none()
            && self.nmiss.is_none()
    }
}

/// Input for a single scored play.
///
/// Exactly one of `acc` or `hits` is expected to be populated;
/// see [`validate_score`](crate::model::validation::validate_score).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScoreParams {
    pub mode: Mode,
    #[serde(default)]
    pub mods: Mods,
    #[serde(default)]
    pub combo: Option<u32>,
    /// Accuracy as a percentage, e.g. `98.5`
    #[serde(default)]
    pub acc: Option<f64>,
    #[serde(default)]
    pub hits: Option<HitCounts>
}

impl ScoreParams {
    pub fn with_accuracy(mode: Mode, mods: Mods, acc: f64) -> ScoreParams {
        ScoreParams {
            mode,
            mods,
            combo: None,
            acc: Some(acc),
            hits: None
        }
    }

    pub fn with_hits(mode: Mode, mods: Mods, hits: HitCounts) -> ScoreParams {
        ScoreParams {
            mode,
            mods,
            combo: None,
            acc: None,
            hits: Some(hits)
        }
    }

    pub fn combo(mut self, combo: u32) -> ScoreParams {
        self.combo = Some(combo);
        self
    }

    pub fn has_accuracy(&self) -> bool {
        self.acc.is_some()
    }

    pub fn has_hit_counts(&self) -> bool {
        self.hits.as_ref().is_some_and(|hits| !hits.is_empty())
    }
}
