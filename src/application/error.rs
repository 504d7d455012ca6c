//! Application-level errors

use std::path::PathBuf;
use thiserror::Error;

/// Application errors: loading the dataset and reading settings.
///
/// The filter engine itself cannot fail; everything here happens before it runs.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("data file not found: {0}")]
    DataFileNotFound(PathBuf),

    #[error("invalid dataset in {path}: {message}")]
    InvalidDataset { path: PathBuf, message: String },

    #[error("no data file given (use --data-file, WATCHTREE_DATA_FILE or data_file in config)")]
    NoDataFile,

    #[error("config error: {message}")]
    Config { message: String },

    #[error("operation failed: {context}")]
    OperationFailed {
        context: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
