// ==========================================
// IWS BDE Plattform - repository layer
// ==========================================
// One repository per entity kind, all sharing a single configured
// connection. Repositories hold no business logic; every mutating call
// commits immediately.
// ==========================================

pub mod activity_repo;
pub mod employee_repo;
pub mod error;
pub mod machine_repo;
pub mod operation_repo;
pub mod work_order_repo;

pub use activity_repo::ActivityRecordRepository;
pub use employee_repo::EmployeeRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use machine_repo::MachineRepository;
pub use operation_repo::OperationRepository;
pub use work_order_repo::WorkOrderRepository;

use chrono::{NaiveDate, NaiveDateTime};
use rusqlite::types::Type;

/// Stored text format for dates (ISO 8601)
pub(crate) const DATE_FMT: &str = "%Y-%m-%d";

/// Stored text format for timestamps (ISO 8601, lexicographically sortable)
pub(crate) const DATETIME_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub(crate) fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FMT).to_string()
}

pub(crate) fn format_datetime(ts: NaiveDateTime) -> String {
    ts.format(DATETIME_FMT).to_string()
}

/// Parse a stored date column, reporting malformed values as a column
/// conversion failure instead of panicking or silently nulling.
pub(crate) fn date_from_sql(idx: usize, raw: &str) -> rusqlite::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, DATE_FMT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub(crate) fn datetime_from_sql(idx: usize, raw: &str) -> rusqlite::Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, DATETIME_FMT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{configure_sqlite_connection, ensure_schema};
    use rusqlite::Connection;
    use std::sync::{Arc, Mutex};

    /// Fresh in-memory database with the full schema applied
    pub fn memory_conn() -> Arc<Mutex<Connection>> {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        configure_sqlite_connection(&conn).expect("configure connection");
        ensure_schema(&conn).expect("create schema");
        Arc::new(Mutex::new(conn))
    }
}
