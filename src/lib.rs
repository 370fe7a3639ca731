pub mod bio;
pub mod cli;
pub mod core;
pub mod utils;

pub use crate::bio::{Dataset, SequenceRecord};
pub use crate::core::redundancy::{remove_redundancy, RedundancyRemover, RedundancyReport};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PruneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InputValidation(String),

    #[error("Parameter out of range: {0}")]
    ParameterRange(String),

    #[error("Worker failure: {0}")]
    WorkerFailure(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, PruneError>;
