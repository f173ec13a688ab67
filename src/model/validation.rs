use thiserror::Error;

use crate::model::structures::score_params::ScoreParams;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ScoreParamsError {
    #[error("both accuracy and hit counts were provided")]
    AccuracyAndHitCounts,

    #[error("either accuracy or hit counts must be provided")]
    MissingAccuracyAndHitCounts
}

/// Checks that exactly one of accuracy or the hit count breakdown is present.
pub fn validate_score(score: &ScoreParams) -> Result<(), ScoreParamsError> {
    match (score.has_accuracy(), score.has_hit_counts()) {
        (true, true) => Err(ScoreParamsError::AccuracyAndHitCounts),
        (false, false) => Err(ScoreParamsError::MissingAccuracyAndHitCounts),
        _ => Ok(())
    }
}
