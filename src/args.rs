use clap::{builder::BoolishValueParser, Parser};
use std::{path::PathBuf, time::Duration};

use crate::{
    config::{ProcessorConfig, ValidationPolicy},
    engine::RosuEngine
};

#[derive(Parser, Clone, Debug)]
#[command(
    display_name = "pp Processor",
    long_about = "Computes performance and difficulty ratings for batches of osu! scores"
)]
pub struct Args {
    /// JSON file containing an array of batch requests:
    /// [{ "beatmap_path": "...", "scores": [{ "mode": 0, "mods": 0, "acc": 98.5 }] }]
    #[arg(short, long, env = "PP_INPUT", help = "Batch request file")]
    pub input: PathBuf,

    /// Results are printed to stdout when omitted
    #[arg(short, long, help = "Write results to this file")]
    pub output: Option<PathBuf>,

    /// Computes scores that provide both or neither of accuracy and hit counts
    /// instead of rejecting their batch
    #[arg(
        long,
        env = "PP_LENIENT",
        action = clap::ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub lenient: bool,

    /// Computes the scores of each batch on a thread pool
    #[arg(
        long,
        env = "PP_PARALLEL",
        action = clap::ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub parallel: bool,

    /// Rates scores with lazer scoring rules instead of stable ones
    #[arg(
        long,
        env = "PP_LAZER",
        action = clap::ArgAction::SetTrue,
        value_parser = BoolishValueParser::new()
    )]
    pub lazer: bool,

    /// Abandons a batch that runs longer than this many milliseconds
    #[arg(long, env = "PP_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        env = "RUST_LOG",
        default_value = "info",
        value_parser = ["trace", "debug", "info", "warn", "error"],
        help = "Sets the logging verbosity"
    )]
    pub log_level: String
}

impl Args {
    pub fn engine(&self) -> RosuEngine {
        RosuEngine::new().lazer(self.lazer)
    }

    pub fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig {
            validation: if self.lenient {
                ValidationPolicy::Lenient
            } else {
                ValidationPolicy::Strict
            },
            parallel: self.parallel,
            timeout: self.timeout_ms.filter(|ms| *ms > 0).map(Duration::from_millis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Args;
    use crate::config::{ProcessorConfig, ValidationPolicy};
    use clap::Parser;
    use serial_test::serial;
    use std::{env, path::PathBuf, time::Duration};

    fn cleanup_env_vars() {
        env::remove_var("PP_LENIENT");
        env::remove_var("PP_PARALLEL");
        env::remove_var("PP_LAZER");
        env::remove_var("PP_TIMEOUT_MS");
    }

    #[test]
    #[serial]
    fn test_minimal_args() {
        cleanup_env_vars();
        let args = Args::try_parse_from(["pp-processor", "--input", "requests.json", "--log-level", "warn"]).unwrap();

        assert_eq!(args.input, PathBuf::from("requests.json"));
        assert_eq!(args.output, None);
        assert_eq!(args.processor_config(), ProcessorConfig::default());
    }

    #[test]
    #[serial]
    fn test_full_args() {
        cleanup_env_vars();
        let args = Args::try_parse_from([
            "pp-processor",
            "-i",
            "requests.json",
            "-o",
            "results.json",
            "--lenient",
            "--parallel",
            "--lazer",
            "--timeout-ms",
            "1500",
            "--log-level",
            "debug"
        ])
        .unwrap();

        let config = args.processor_config();

        assert_eq!(args.output, Some(PathBuf::from("results.json")));
        assert_eq!(args.log_level, "debug");
        assert!(args.lazer);
        assert_eq!(config.validation, ValidationPolicy::Lenient);
        assert!(config.parallel);
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
    }

    #[test]
    #[serial]
    fn test_flags_accept_config_env_values() {
        cleanup_env_vars();
        env::set_var("PP_LENIENT", "1");
        env::set_var("PP_PARALLEL", "yes");

        let args = Args::try_parse_from(["pp-processor", "-i", "requests.json", "--log-level", "warn"]).unwrap();

        assert_eq!(args.processor_config(), ProcessorConfig::from_env());
        assert_eq!(args.processor_config().validation, ValidationPolicy::Lenient);
        assert!(args.processor_config().parallel);

        cleanup_env_vars();
    }

    #[test]
    #[serial]
    fn test_flags_accept_false_env_values() {
        cleanup_env_vars();
        env::set_var("PP_LENIENT", "no");
        env::set_var("PP_PARALLEL", "0");

        let args = Args::try_parse_from(["pp-processor", "-i", "requests.json", "--log-level", "warn"]).unwrap();

        assert_eq!(args.processor_config(), ProcessorConfig::default());
        assert_eq!(args.processor_config(), ProcessorConfig::from_env());

        cleanup_env_vars();
    }

    #[test]
    fn test_rejects_unknown_log_level() {
        let result = Args::try_parse_from(["pp-processor", "-i", "requests.json", "--log-level", "loud"]);
        assert!(result.is_err());
    }
}
