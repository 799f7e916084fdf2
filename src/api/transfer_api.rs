// ==========================================
// CSV transfer API
// ==========================================
// Dispatches bulk CSV import and export by entity name. Unknown entity
// names are a not-found condition; row errors from the import engine are
// a client-side rejection.
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::EntityKind;
use crate::exporter::CsvExporter;
use crate::importer::{CsvImporter, ImportSummary};

pub struct TransferApi {
    importer: Arc<CsvImporter>,
    exporter: Arc<CsvExporter>,
}

impl TransferApi {
    pub fn new(importer: Arc<CsvImporter>, exporter: Arc<CsvExporter>) -> Self {
        Self { importer, exporter }
    }

    fn resolve(&self, entity: &str) -> ApiResult<EntityKind> {
        EntityKind::parse(entity)
            .ok_or_else(|| ApiError::NotFound(format!("Unknown entity '{}'", entity)))
    }

    /// Import a CSV payload for the named entity kind
    pub fn import(&self, entity: &str, csv_text: &str) -> ApiResult<ImportSummary> {
        let kind = self.resolve(entity)?;
        let summary = self.importer.import(kind, csv_text)?;
        Ok(summary)
    }

    /// Export the named entity kind as a CSV document
    pub fn export(&self, entity: &str) -> ApiResult<String> {
        let kind = self.resolve(entity)?;
        let document = self.exporter.export(kind)?;
        tracing::info!(entity = kind.as_str(), "CSV export rendered");
        Ok(document)
    }
}
