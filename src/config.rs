use serde::{Deserialize, Serialize};
use std::{env, time::Duration};

/// What to do with a score that has both (or neither of) accuracy and hit counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationPolicy {
    /// Reject the whole batch
    #[default]
    Strict,
    /// Log a warning and let the engine decide
    Lenient
}

/// Configuration for batch processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessorConfig {
    pub validation: ValidationPolicy,
    /// Calculate the scores of a batch on the rayon pool.
    /// Result order is unaffected.
    pub parallel: bool,
    /// Deadline for a whole batch when run through
    /// [`BatchProcessor::compute_batch_async`](crate::model::batch::BatchProcessor::compute_batch_async)
    pub timeout: Option<Duration>
}

impl ProcessorConfig {
    /// Creates a new configuration from environment variables.
    /// Unset or unparsable values fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let validation = if env_flag("PP_LENIENT") {
            ValidationPolicy::Lenient
        } else {
            defaults.validation
        };

        let timeout = env::var("PP_TIMEOUT_MS")
            .ok()
            .and_then(|ms| ms.parse::<u64>().ok())
            .filter(|ms| *ms > 0)
            .map(Duration::from_millis)
            .or(defaults.timeout);

        Self {
            validation,
            parallel: env_flag("PP_PARALLEL"),
            timeout
        }
    }
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            validation: ValidationPolicy::Strict,
            parallel: false,
            timeout: None
        }
    }
}

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "t" | "true" | "on" | "1"))
        .unwrap_or(false)
}
