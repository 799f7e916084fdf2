// ==========================================
// OperationRepository - operation data access
// ==========================================

use crate::domain::{NewOperation, Operation, OperationUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const COLUMNS: &str =
    "id, code, description, work_order_id, machine_id, standard_time_minutes, is_active";

pub struct OperationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OperationRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> SqliteResult<Operation> {
        Ok(Operation {
            id: row.get(0)?,
            code: row.get(1)?,
            description: row.get(2)?,
            work_order_id: row.get(3)?,
            machine_id: row.get(4)?,
            standard_time_minutes: row.get(5)?,
            is_active: row.get(6)?,
        })
    }

    /// Insert a new operation. The referenced work order (and machine, if
    /// set) must exist; SQLite reports a violated reference as a foreign
    /// key failure.
    pub fn create(&self, payload: &NewOperation) -> RepositoryResult<Operation> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO operations
                (code, description, work_order_id, machine_id, standard_time_minutes, is_active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                payload.code,
                payload.description,
                payload.work_order_id,
                payload.machine_id,
                payload.standard_time_minutes,
                payload.is_active,
            ],
        )?;

        Ok(Operation {
            id: conn.last_insert_rowid(),
            code: payload.code.clone(),
            description: payload.description.clone(),
            work_order_id: payload.work_order_id,
            machine_id: payload.machine_id,
            standard_time_minutes: payload.standard_time_minutes,
            is_active: payload.is_active,
        })
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Operation>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM operations WHERE id = ?1"))?;
        let result = stmt.query_row(params![id], Self::map_row);

        match result {
            Ok(operation) => Ok(Some(operation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Operation>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM operations WHERE code = ?1"))?;
        let result = stmt.query_row(params![code], Self::map_row);

        match result {
            Ok(operation) => Ok(Some(operation)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all operations ordered by code
    pub fn list(&self) -> RepositoryResult<Vec<Operation>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM operations ORDER BY code ASC"))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn update(
        &self,
        operation: &Operation,
        changes: &OperationUpdate,
    ) -> RepositoryResult<Operation> {
        let mut updated = operation.clone();
        changes.apply_to(&mut updated);

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE operations
            SET description = ?1, work_order_id = ?2, machine_id = ?3,
                standard_time_minutes = ?4, is_active = ?5
            WHERE id = ?6
            "#,
            params![
                updated.description,
                updated.work_order_id,
                updated.machine_id,
                updated.standard_time_minutes,
                updated.is_active,
                updated.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Operation",
                id: operation.id.to_string(),
            });
        }
        Ok(updated)
    }

    /// Delete an operation; cascades to its activity records.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM operations WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Operation",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewMachine, NewWorkOrder};
    use crate::repository::test_support::memory_conn;
    use crate::repository::{MachineRepository, WorkOrderRepository};
    use std::sync::{Arc, Mutex};

    fn setup() -> (Arc<Mutex<Connection>>, i64, i64) {
        let conn = memory_conn();
        let order = WorkOrderRepository::new(conn.clone())
            .create(&NewWorkOrder {
                order_number: "WO-1".to_string(),
                customer: None,
                article: None,
                quantity: None,
                due_date: None,
                status: "open".to_string(),
            })
            .unwrap();
        let machine = MachineRepository::new(conn.clone())
            .create(&NewMachine {
                code: "M-01".to_string(),
                name: "Drehbank".to_string(),
                description: None,
                location: None,
                active: true,
            })
            .unwrap();
        (conn, order.id, machine.id)
    }

    fn payload(code: &str, work_order_id: i64, machine_id: Option<i64>) -> NewOperation {
        NewOperation {
            code: code.to_string(),
            description: Some("Drehen".to_string()),
            work_order_id,
            machine_id,
            standard_time_minutes: Some(12.5),
            is_active: true,
        }
    }

    #[test]
    fn test_create_and_find_by_code() {
        let (conn, order_id, machine_id) = setup();
        let repo = OperationRepository::new(conn);
        let created = repo
            .create(&payload("OP-10", order_id, Some(machine_id)))
            .unwrap();

        let found = repo.find_by_code("OP-10").unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.machine_id, Some(machine_id));
    }

    #[test]
    fn test_missing_work_order_reference_rejected() {
        let (conn, _, _) = setup();
        let repo = OperationRepository::new(conn);
        let result = repo.create(&payload("OP-10", 999, None));
        assert!(matches!(
            result,
            Err(RepositoryError::ForeignKeyViolation(_))
        ));
    }

    #[test]
    fn test_code_unique_across_work_orders() {
        let (conn, order_id, _) = setup();
        let second_order = WorkOrderRepository::new(conn.clone())
            .create(&NewWorkOrder {
                order_number: "WO-2".to_string(),
                customer: None,
                article: None,
                quantity: None,
                due_date: None,
                status: "open".to_string(),
            })
            .unwrap();

        let repo = OperationRepository::new(conn);
        repo.create(&payload("OP-10", order_id, None)).unwrap();

        // same code under a different work order still collides
        let result = repo.create(&payload("OP-10", second_order.id, None));
        assert!(matches!(
            result,
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));
    }
}
