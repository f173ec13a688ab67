/// The flow of a batch:
/// validate → load beatmap → per score: normalize → engine → sanitize → assemble
pub mod batch;
mod constants;
pub mod normalize;
pub mod sanitize;
pub mod structures;
pub mod validation;

pub use batch::{calculate_performances, BatchProcessor, ProcessorError};
