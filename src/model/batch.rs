use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration
};

use rayon::prelude::*;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::{debug, info, warn};

use crate::{
    config::{ProcessorConfig, ValidationPolicy},
    engine::{EngineError, RatingEngine},
    model::{
        sanitize::assemble,
        structures::{performance_result::PerformanceResult, score_params::ScoreParams},
        validation::{validate_score, ScoreParamsError}
    }
};

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Failed to load beatmap: {0}")]
    BeatmapLoad(#[source] EngineError),

    #[error("Invalid score parameters at index {index}: {reason}")]
    InvalidScoreParams { index: usize, reason: ScoreParamsError },

    #[error("Rating engine failed on score {index}: {source}")]
    Engine {
        index: usize,
        #[source]
        source: EngineError
    },

    #[error("Batch did not finish within {0:?}")]
    Timeout(Duration),

    #[error("Batch worker failed: {0}")]
    Worker(#[from] JoinError)
}

/// Calculates every score of a batch against one shared beatmap.
pub struct BatchProcessor<E> {
    engine: E,
    config: ProcessorConfig
}

impl<E: RatingEngine> BatchProcessor<E> {
    pub fn new(engine: E, config: ProcessorConfig) -> BatchProcessor<E> {
        BatchProcessor { engine, config }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// # Batch processing
    ///
    /// Steps:
    /// 1. Validate every score up front. Under the strict policy the first invalid
    ///     score rejects the batch before the beatmap is touched.
    /// 2. Load the beatmap once. It is dropped when this call returns.
    /// 3. For each score: normalize mods, run the engine, sanitize and assemble.
    ///
    /// The returned results line up 1:1 with `scores`, also in parallel mode.
    /// Any error returns no results at all.
    pub fn compute_batch(
        &self,
        beatmap_path: &Path,
        scores: &[ScoreParams]
    ) -> Result<Vec<PerformanceResult>, ProcessorError> {
        self.validate(scores)?;

        let beatmap = self
            .engine
            .load_beatmap(beatmap_path)
            .map_err(ProcessorError::BeatmapLoad)?;

        debug!(
            path = %beatmap_path.display(),
            n_scores = scores.len(),
            parallel = self.config.parallel,
            "Computing batch"
        );

        let results = if self.config.parallel {
            scores
                .par_iter()
                .enumerate()
                .map(|(index, score)| self.compute_score(&beatmap, index, score))
                .collect::<Result<Vec<_>, _>>()?
        } else {
            scores
                .iter()
                .enumerate()
                .map(|(index, score)| self.compute_score(&beatmap, index, score))
                .collect::<Result<Vec<_>, _>>()?
        };

        info!(path = %beatmap_path.display(), n_results = results.len(), "Batch computed");

        Ok(results)
    }

    fn validate(&self, scores: &[ScoreParams]) -> Result<(), ProcessorError> {
        for (index, score) in scores.iter().enumerate() {
            if let Err(reason) = validate_score(score) {
                match self.config.validation {
                    ValidationPolicy::Strict => {
                        return Err(ProcessorError::InvalidScoreParams { index, reason });
                    }
                    ValidationPolicy::Lenient => {
                        warn!(index, %reason, "Computing score with ambiguous parameters");
                    }
                }
            }
        }

        Ok(())
    }

    fn compute_score(
        &self,
        beatmap: &E::Beatmap,
        index: usize,
        score: &ScoreParams
    ) -> Result<PerformanceResult, ProcessorError> {
        let normalized = score.normalized();

        let raw = self
            .engine
            .compute_rating(beatmap, &normalized)
            .map_err(|source| ProcessorError::Engine { index, source })?;

        Ok(assemble(raw))
    }
}

impl<E: RatingEngine + 'static> BatchProcessor<E> {
    /// Runs [`compute_batch`](Self::compute_batch) on tokio's blocking pool.
    ///
    /// With a configured timeout the batch is abandoned once the deadline passes:
    /// its results are discarded and the worker is left to finish on its own.
    pub async fn compute_batch_async(
        self: Arc<Self>,
        beatmap_path: PathBuf,
        scores: Vec<ScoreParams>
    ) -> Result<Vec<PerformanceResult>, ProcessorError> {
        let timeout = self.config.timeout;
        let worker = tokio::task::spawn_blocking(move || self.compute_batch(&beatmap_path, &scores));

        match timeout {
            Some(limit) => match tokio::time::timeout(limit, worker).await {
                Ok(joined) => joined?,
                Err(_) => Err(ProcessorError::Timeout(limit))
            },
            None => worker.await?
        }
    }
}

/// Computes a batch with the default configuration.
pub fn calculate_performances<E: RatingEngine>(
    engine: E,
    beatmap_path: &Path,
    scores: &[ScoreParams]
) -> Result<Vec<PerformanceResult>, ProcessorError> {
    BatchProcessor::new(engine, ProcessorConfig::default()).compute_batch(beatmap_path, scores)
}
