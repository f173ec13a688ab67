//! Boundary to the difficulty / performance calculation engine.
//!
//! The pipeline never does pp math itself. Everything it needs from an
//! engine is described by [`RatingEngine`], so the production engine
//! ([`RosuEngine`]) can be swapped for a deterministic stub in tests.

pub mod rosu;

use std::{io, path::Path, path::PathBuf};
use thiserror::Error;

use crate::model::structures::score_params::ScoreParams;

pub use rosu::RosuEngine;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Failed to read beatmap {}: {source}", path.display())]
    BeatmapRead {
        path: PathBuf,
        #[source]
        source: io::Error
    },

    #[error("Failed to parse beatmap {}: {reason}", path.display())]
    BeatmapParse { path: PathBuf, reason: String },

    #[error("Calculation failed: {0}")]
    Calculation(String)
}

/// Unsanitized engine output for one score.
///
/// Values may be NaN or infinite for inconsistent inputs
/// (e.g. a combo larger than the hit counts allow).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRating {
    pub pp: f64,
    pub pp_acc: Option<f64>,
    pub pp_aim: Option<f64>,
    pub pp_speed: Option<f64>,
    pub pp_flashlight: Option<f64>,
    pub effective_miss_count: Option<f64>,
    pub pp_difficulty: Option<f64>,

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

pub trait RatingEngine: Send + Sync {
    /// Parsed beatmap, shared read-only by every score of a batch
    type Beatmap: Send + Sync;

    fn load_beatmap(&self, path: &Path) -> Result<Self::Beatmap, EngineError>;

    /// Must be deterministic for identical `(beatmap, score)` pairs.
    /// `score` has already been normalized.
    fn compute_rating(&self, beatmap: &Self::Beatmap, score: &ScoreParams) -> Result<RawRating, EngineError>;
}

impl<E: RatingEngine> RatingEngine for &E {
    type Beatmap = E::Beatmap;

    fn load_beatmap(&self, path: &Path) -> Result<Self::Beatmap, EngineError> {
        (**self).load_beatmap(path)
    }

    fn compute_rating(&self, beatmap: &Self::Beatmap, score: &ScoreParams) -> Result<RawRating, EngineError> {
        (**self).compute_rating(beatmap, score)
    }
}
