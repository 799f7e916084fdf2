// ==========================================
// IWS BDE Plattform - import layer errors
// ==========================================
// Every data error carries the 1-based file row it occurred on so the
// caller can point at the offending line.
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Import layer error type
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV parse failed: {0}")]
    CsvParseError(String),

    #[error("missing {field} (row {row})")]
    MissingField { row: usize, field: &'static str },

    #[error("type conversion failed (row {row}, field {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: &'static str,
        message: String,
    },

    #[error("value out of range (row {row}, field {field}): {value} must not be negative")]
    NegativeValueError {
        row: usize,
        field: &'static str,
        value: f64,
    },

    #[error("{entity} '{key}' not found for {context} (row {row})")]
    ReferenceNotFound {
        row: usize,
        entity: &'static str,
        key: String,
        context: String,
    },

    #[error("activity record with id {id} not found (row {row})")]
    RecordNotFound { row: usize, id: i64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result alias for the import layer
pub type ImportResult<T> = Result<T, ImportError>;
