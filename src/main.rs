use clap::Parser;
use pp_processor::{
    args::Args,
    model::BatchProcessor,
    request::{process_requests, read_requests, write_outcomes}
};
use std::{process, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let args = Args::parse();

    // Logs go to stderr, stdout is reserved for results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&args.log_level))
        .with_writer(std::io::stderr)
        .init();

    let requests = match read_requests(&args.input) {
        Ok(requests) => requests,
        Err(e) => {
            error!("{}", e);
            error!("Nothing to process without a valid request file");
            process::exit(1);
        }
    };

    let config = args.processor_config();
    info!(
        n_batches = requests.len(),
        validation = ?config.validation,
        parallel = config.parallel,
        "Processing batch requests"
    );

    let processor = Arc::new(BatchProcessor::new(args.engine(), config));
    let outcomes = process_requests(processor, requests).await;

    if let Err(e) = write_outcomes(&outcomes, args.output.as_deref()) {
        error!("{}", e);
        process::exit(1);
    }
}
