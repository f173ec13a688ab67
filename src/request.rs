use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::Arc
};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::{
    engine::RatingEngine,
    model::{
        batch::BatchProcessor,
        structures::{performance_result::PerformanceResult, score_params::ScoreParams}
    },
    utils::progress_utils::progress_bar
};

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error
    },

    #[error("Invalid batch JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to write results: {0}")]
    Write(#[from] io::Error)
}

/// One beatmap and the scores to calculate on it
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct BatchRequest {
    pub beatmap_path: PathBuf,
    pub scores: Vec<ScoreParams>
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum BatchOutcome {
    Computed {
        beatmap_path: PathBuf,
        results: Vec<PerformanceResult>
    },
    Failed {
        beatmap_path: PathBuf,
        error: String
    }
}

impl BatchOutcome {
    pub fn is_failed(&self) -> bool {
        matches!(self, BatchOutcome::Failed { .. })
    }
}

pub fn read_requests(path: &Path) -> Result<Vec<BatchRequest>, RequestError> {
    let content = fs::read_to_string(path).map_err(|source| RequestError::Read {
        path: path.to_path_buf(),
        source
    })?;

    Ok(serde_json::from_str(&content)?)
}

/// Runs every request as its own batch. Batches run concurrently, each with
/// its own beatmap handle. Outcomes are returned in request order and a
/// failing batch does not affect the others.
pub async fn process_requests<E: RatingEngine + 'static>(
    processor: Arc<BatchProcessor<E>>,
    requests: Vec<BatchRequest>
) -> Vec<BatchOutcome> {
    let bar = progress_bar(requests.len() as u64, "Computing batches".to_string());
    let paths = requests.iter().map(|r| r.beatmap_path.clone()).collect_vec();

    let mut tasks = JoinSet::new();
    for (index, request) in requests.into_iter().enumerate() {
        let processor = processor.clone();
        tasks.spawn(async move {
            let result = processor.compute_batch_async(request.beatmap_path, request.scores).await;
            (index, result)
        });
    }

    let mut outcomes: Vec<Option<BatchOutcome>> = vec![None; paths.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, result) = match joined {
            Ok(finished) => finished,
            Err(e) => {
                error!("Batch task panicked: {}", e);
                continue;
            }
        };

        let beatmap_path = paths[index].clone();
        outcomes[index] = Some(match result {
            Ok(results) => BatchOutcome::Computed { beatmap_path, results },
            Err(e) => {
                error!(path = %beatmap_path.display(), "Batch failed: {}", e);
                BatchOutcome::Failed {
                    beatmap_path,
                    error: e.to_string()
                }
            }
        });

        if let Some(bar) = &bar {
            bar.inc(1);
        }
    }

    if let Some(bar) = &bar {
        bar.finish_and_clear();
    }

    let outcomes = outcomes
        .into_iter()
        .zip(paths)
        .map(|(outcome, beatmap_path)| {
            outcome.unwrap_or_else(|| BatchOutcome::Failed {
                beatmap_path,
                error: "batch task did not complete".to_string()
            })
        })
        .collect_vec();

    info!(
        n_batches = outcomes.len(),
        n_failed = outcomes.iter().filter(|o| o.is_failed()).count(),
        parallel = processor.config().parallel,
        "Finished processing batches"
    );

    outcomes
}

/// Writes outcomes as pretty JSON to `path`, or stdout when `None`.
pub fn write_outcomes(outcomes: &[BatchOutcome], path: Option<&Path>) -> Result<(), RequestError> {
    match path {
        Some(path) => {
            let mut writer = io::BufWriter::new(fs::File::create(path)?);
            serde_json::to_writer_pretty(&mut writer, outcomes)?;
            writer.flush()?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            serde_json::to_writer_pretty(&mut handle, outcomes)?;
            writeln!(handle)?;
        }
    }

    Ok(())
}
