//! Application module: command line, configuration and the thread pipeline

pub mod cli;
mod error;
pub mod runner;
pub mod startup;

pub use error::{AppError, AppResult};
pub use runner::{run_pipeline, PipelineReport};
