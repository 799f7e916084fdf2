// ==========================================
// IWS BDE Plattform - application state
// ==========================================
// Wires one shared database connection through the repositories into the
// API instances. Held as axum state for the lifetime of the process.
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{
    ActivityApi, EmployeeApi, MachineApi, OperationApi, TransferApi, WorkOrderApi,
};
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::exporter::CsvExporter;
use crate::importer::CsvImporter;
use crate::repository::{
    ActivityRecordRepository, EmployeeRepository, MachineRepository, OperationRepository,
    WorkOrderRepository,
};

/// Application state holding all API instances
pub struct AppState {
    /// Database path the state was built from
    pub db_path: String,

    pub employee_api: Arc<EmployeeApi>,
    pub machine_api: Arc<MachineApi>,
    pub work_order_api: Arc<WorkOrderApi>,
    pub operation_api: Arc<OperationApi>,
    pub activity_api: Arc<ActivityApi>,

    /// CSV import/export
    pub transfer_api: Arc<TransferApi>,
}

impl AppState {
    /// Open the database, ensure the schema and build the API instances
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!(db_path = %db_path, "initializing AppState");

        let conn = open_sqlite_connection(&db_path)
            .map_err(|e| format!("cannot open database: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("cannot create schema: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // Repository layer
        let employee_repo = Arc::new(EmployeeRepository::new(conn.clone()));
        let machine_repo = Arc::new(MachineRepository::new(conn.clone()));
        let work_order_repo = Arc::new(WorkOrderRepository::new(conn.clone()));
        let operation_repo = Arc::new(OperationRepository::new(conn.clone()));
        let activity_repo = Arc::new(ActivityRecordRepository::new(conn));

        // Import/export engines
        let importer = Arc::new(CsvImporter::new(
            employee_repo.clone(),
            machine_repo.clone(),
            work_order_repo.clone(),
            operation_repo.clone(),
            activity_repo.clone(),
        ));
        let exporter = Arc::new(CsvExporter::new(
            employee_repo.clone(),
            machine_repo.clone(),
            work_order_repo.clone(),
            operation_repo.clone(),
            activity_repo.clone(),
        ));

        // API layer
        let employee_api = Arc::new(EmployeeApi::new(employee_repo.clone()));
        let machine_api = Arc::new(MachineApi::new(machine_repo.clone()));
        let work_order_api = Arc::new(WorkOrderApi::new(work_order_repo.clone()));
        let operation_api = Arc::new(OperationApi::new(
            operation_repo.clone(),
            work_order_repo,
            machine_repo,
        ));
        let activity_api = Arc::new(ActivityApi::new(activity_repo, employee_repo, operation_repo));
        let transfer_api = Arc::new(TransferApi::new(importer, exporter));

        tracing::info!("AppState initialized");

        Ok(Self {
            db_path,
            employee_api,
            machine_api,
            work_order_api,
            operation_api,
            activity_api,
            transfer_api,
        })
    }
}
