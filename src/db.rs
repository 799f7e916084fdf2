// ==========================================
// IWS BDE Plattform - SQLite connection init
// ==========================================
// Goals:
// - unify PRAGMA behavior for every Connection::open (foreign keys must be
//   enabled per connection, otherwise cascades silently stop working)
// - unify busy_timeout to reduce spurious busy errors under concurrent writes
// - create the schema once at startup (CREATE TABLE IF NOT EXISTS)
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the uniform PRAGMAs to a SQLite connection
///
/// foreign_keys and busy_timeout are per-connection settings.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the uniform configuration applied
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the BDE schema if it does not exist yet.
///
/// Natural keys are UNIQUE among live rows; ownership is expressed as
/// ON DELETE CASCADE so that deleting a parent never leaves a dangling
/// foreign key (employee -> activity_records, machine -> operations,
/// work_order -> operations, operation -> activity_records).
pub fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS employees (
          id                INTEGER PRIMARY KEY AUTOINCREMENT,
          personnel_number  TEXT NOT NULL UNIQUE,
          first_name        TEXT NOT NULL,
          last_name         TEXT NOT NULL,
          department        TEXT,
          role              TEXT,
          active            INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS machines (
          id           INTEGER PRIMARY KEY AUTOINCREMENT,
          code         TEXT NOT NULL UNIQUE,
          name         TEXT NOT NULL,
          description  TEXT,
          location     TEXT,
          active       INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS work_orders (
          id            INTEGER PRIMARY KEY AUTOINCREMENT,
          order_number  TEXT NOT NULL UNIQUE,
          customer      TEXT,
          article       TEXT,
          quantity      INTEGER,
          due_date      TEXT,
          status        TEXT NOT NULL DEFAULT 'open'
        );

        CREATE TABLE IF NOT EXISTS operations (
          id                     INTEGER PRIMARY KEY AUTOINCREMENT,
          code                   TEXT NOT NULL UNIQUE,
          description            TEXT,
          work_order_id          INTEGER NOT NULL
                                 REFERENCES work_orders(id) ON DELETE CASCADE,
          machine_id             INTEGER
                                 REFERENCES machines(id) ON DELETE CASCADE,
          standard_time_minutes  REAL,
          is_active              INTEGER NOT NULL DEFAULT 1
        );

        CREATE TABLE IF NOT EXISTS activity_records (
          id               INTEGER PRIMARY KEY AUTOINCREMENT,
          start_time       TEXT NOT NULL,
          end_time         TEXT,
          employee_id      INTEGER NOT NULL
                           REFERENCES employees(id) ON DELETE CASCADE,
          operation_id     INTEGER NOT NULL
                           REFERENCES operations(id) ON DELETE CASCADE,
          quantity_good    INTEGER NOT NULL DEFAULT 0,
          quantity_reject  INTEGER NOT NULL DEFAULT 0,
          status           TEXT NOT NULL DEFAULT 'completed',
          comment          TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_operations_work_order
          ON operations(work_order_id);
        CREATE INDEX IF NOT EXISTS idx_operations_machine
          ON operations(machine_id);
        CREATE INDEX IF NOT EXISTS idx_activity_employee
          ON activity_records(employee_id);
        CREATE INDEX IF NOT EXISTS idx_activity_operation
          ON activity_records(operation_id);
        CREATE INDEX IF NOT EXISTS idx_activity_start_time
          ON activity_records(start_time DESC);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        ensure_schema(&conn).unwrap();
        ensure_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN \
                 ('employees','machines','work_orders','operations','activity_records')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 5);
    }

    #[test]
    fn test_foreign_keys_enabled() {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        let enabled: i64 = conn
            .query_row("PRAGMA foreign_keys", [], |row| row.get(0))
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
