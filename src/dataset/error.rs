use std::path::PathBuf;
use arrow::error::ArrowError;
use thiserror::Error;

/// Errors raised by a single pipeline step
#[derive(Debug, Error)]
pub enum IngestError {
    /// Params file could not be opened or read
    #[error("params file {path:?} not found: {source}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Params file is not valid YAML or holds a non-numeric value
    #[error("params file {path:?} is malformed: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Required key path is absent from the params file
    #[error("params file {path:?} has no `{key}` entry")]
    ConfigKeyMissing { path: PathBuf, key: String },

    /// Retrieved content holds no data rows
    #[error("dataset from {0} is empty")]
    EmptyDataset(String),

    /// Retrieved content is not well-formed CSV
    #[error("dataset from {locator} could not be parsed: {source}")]
    DatasetParseError {
        locator: String,
        #[source]
        source: ArrowError,
    },

    /// Network, permission or any other retrieval failure
    #[error("failed to retrieve dataset from {locator}: {message}")]
    AcquisitionError { locator: String, message: String },

    /// A required column is missing
    #[error("dataset has no `{0}` column")]
    SchemaError(String),

    /// Filtering or recoding failed
    #[error("transform failed: {0}")]
    TransformError(String),

    /// Split fraction outside of (0, 1)
    #[error("test size {0} must be strictly between 0 and 1")]
    InvalidSplitFraction(f64),

    /// Not enough rows for a non-empty train and test split
    #[error("{rows} rows cannot be split with test size {test_size}")]
    InsufficientData { rows: usize, test_size: f64 },

    /// Output directory or file could not be written
    #[error("failed to write {path:?}: {message}")]
    PersistError { path: PathBuf, message: String },
}

impl From<ArrowError> for IngestError {
    fn from(e: ArrowError) -> Self {
        IngestError::TransformError(e.to_string())
    }
}
