// ==========================================
// WorkOrderRepository - work order data access
// ==========================================

use crate::domain::{NewWorkOrder, WorkOrder, WorkOrderUpdate};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{date_from_sql, format_date};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const COLUMNS: &str = "id, order_number, customer, article, quantity, due_date, status";

pub struct WorkOrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl WorkOrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> SqliteResult<WorkOrder> {
        let due_date = row
            .get::<_, Option<String>>(5)?
            .map(|raw| date_from_sql(5, &raw))
            .transpose()?;

        Ok(WorkOrder {
            id: row.get(0)?,
            order_number: row.get(1)?,
            customer: row.get(2)?,
            article: row.get(3)?,
            quantity: row.get(4)?,
            due_date,
            status: row.get(6)?,
        })
    }

    pub fn create(&self, payload: &NewWorkOrder) -> RepositoryResult<WorkOrder> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO work_orders (order_number, customer, article, quantity, due_date, status)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                payload.order_number,
                payload.customer,
                payload.article,
                payload.quantity,
                payload.due_date.map(format_date),
                payload.status,
            ],
        )?;

        Ok(WorkOrder {
            id: conn.last_insert_rowid(),
            order_number: payload.order_number.clone(),
            customer: payload.customer.clone(),
            article: payload.article.clone(),
            quantity: payload.quantity,
            due_date: payload.due_date,
            status: payload.status.clone(),
        })
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<WorkOrder>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM work_orders WHERE id = ?1"))?;
        let result = stmt.query_row(params![id], Self::map_row);

        match result {
            Ok(order) => Ok(Some(order)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_order_number(&self, order_number: &str) -> RepositoryResult<Option<WorkOrder>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM work_orders WHERE order_number = ?1"
        ))?;
        let result = stmt.query_row(params![order_number], Self::map_row);

        match result {
            Ok(order) => Ok(Some(order)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all work orders ordered by order number
    pub fn list(&self) -> RepositoryResult<Vec<WorkOrder>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM work_orders ORDER BY order_number ASC"
        ))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn update(
        &self,
        order: &WorkOrder,
        changes: &WorkOrderUpdate,
    ) -> RepositoryResult<WorkOrder> {
        let mut updated = order.clone();
        changes.apply_to(&mut updated);

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE work_orders
            SET customer = ?1, article = ?2, quantity = ?3, due_date = ?4, status = ?5
            WHERE id = ?6
            "#,
            params![
                updated.customer,
                updated.article,
                updated.quantity,
                updated.due_date.map(format_date),
                updated.status,
                updated.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "WorkOrder",
                id: order.id.to_string(),
            });
        }
        Ok(updated)
    }

    /// Delete a work order; cascades to its operations and transitively to
    /// their activity records.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM work_orders WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "WorkOrder",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use crate::repository::test_support::memory_conn;

    fn payload(number: &str) -> NewWorkOrder {
        NewWorkOrder {
            order_number: number.to_string(),
            customer: Some("IWS GmbH".to_string()),
            article: None,
            quantity: Some(250),
            due_date: NaiveDate::from_ymd_opt(2026, 4, 15),
            status: "open".to_string(),
        }
    }

    #[test]
    fn test_create_roundtrips_due_date() {
        let repo = WorkOrderRepository::new(memory_conn());
        let created = repo.create(&payload("WO-100")).unwrap();

        let found = repo.find_by_order_number("WO-100").unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.due_date, NaiveDate::from_ymd_opt(2026, 4, 15));
    }

    #[test]
    fn test_update_clears_optional_fields() {
        let repo = WorkOrderRepository::new(memory_conn());
        let created = repo.create(&payload("WO-100")).unwrap();

        let changes = WorkOrderUpdate {
            due_date: Some(None),
            customer: Some(None),
            status: Some("released".to_string()),
            ..Default::default()
        };
        let updated = repo.update(&created, &changes).unwrap();

        assert_eq!(updated.due_date, None);
        assert_eq!(updated.customer, None);
        assert_eq!(updated.status, "released");

        let reread = repo.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(reread, updated);
    }

    #[test]
    fn test_duplicate_order_number_rejected() {
        let repo = WorkOrderRepository::new(memory_conn());
        repo.create(&payload("WO-100")).unwrap();
        assert!(matches!(
            repo.create(&payload("WO-100")),
            Err(RepositoryError::UniqueConstraintViolation(_))
        ));
    }
}
