// ==========================================
// IWS BDE Plattform - Kernbibliothek
// ==========================================
// Betriebsdatenerfassung backend: master data, work orders,
// operations and captured activity records, with CSV exchange.
// Stack: Rust + SQLite + axum
// ==========================================

// ==========================================
// Module declarations
// ==========================================

// Domain layer - entities and payloads
pub mod domain;

// Repository layer - data access
pub mod repository;

// Import layer - CSV reconciliation
pub mod importer;

// Export layer - CSV rendering
pub mod exporter;

// Configuration layer
pub mod config;

// Database infrastructure (connection init / PRAGMA / schema)
pub mod db;

// Logging
pub mod logging;

// API layer - business interfaces
pub mod api;

// Application layer - HTTP integration
pub mod app;

// ==========================================
// Re-exports of core types
// ==========================================

// Domain entities
pub use domain::{
    ActivityRecord, Employee, EntityKind, Machine, Operation, WorkOrder,
};

// Import/export engines
pub use exporter::CsvExporter;
pub use importer::{CsvImporter, ImportSummary};

// API
pub use api::{
    ActivityApi, EmployeeApi, MachineApi, OperationApi, TransferApi, WorkOrderApi,
};

// ==========================================
// Constants
// ==========================================

// System version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// System name
pub const APP_NAME: &str = "IWS BDE Plattform";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
