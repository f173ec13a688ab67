pub mod args;
pub mod config;
pub mod engine;
pub mod model;
pub mod request;
pub mod utils;
