//! Error types for the bankruptcy explorer

use thiserror::Error;

/// Result type alias for dataset and selection operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

/// Errors raised while loading a dataset or selecting a row from it
#[derive(Error, Debug)]
pub enum ExplorerError {
    #[error("Dataset contains no rows")]
    EmptyDataset,

    #[error("Column not found: {0}")]
    MissingColumn(String),

    #[error("Data error: {0}")]
    Data(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<polars::error::PolarsError> for ExplorerError {
    fn from(err: polars::error::PolarsError) -> Self {
        ExplorerError::Data(err.to_string())
    }
}
