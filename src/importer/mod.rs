// ==========================================
// IWS BDE Plattform - import layer
// ==========================================
// Pipeline: CSV text -> raw records (file_parser) -> typed fields
// (value_parser) -> insert-or-update against the store (reconciler).
// ==========================================

pub mod error;
pub mod file_parser;
pub mod reconciler;
pub mod value_parser;

pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, RawRecord};
pub use reconciler::{CsvImporter, ImportSummary};
