// ==========================================
// IWS BDE Plattform - export layer
// ==========================================
// Renders entity snapshots as flat CSV documents with a fixed header row
// and denormalized natural-key references.
// ==========================================

pub mod csv_writer;
pub mod entity_exporter;

pub use entity_exporter::CsvExporter;

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// Export layer error type
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("CSV rendering failed: {0}")]
    CsvWriteError(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl From<csv::Error> for ExportError {
    fn from(err: csv::Error) -> Self {
        ExportError::CsvWriteError(err.to_string())
    }
}

/// Result alias for the export layer
pub type ExportResult<T> = Result<T, ExportError>;
