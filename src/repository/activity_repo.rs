// ==========================================
// ActivityRecordRepository - captured production data access
// ==========================================

use crate::domain::{ActivityRecord, ActivityRecordUpdate, NewActivityRecord};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::{datetime_from_sql, format_datetime};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const COLUMNS: &str = "id, start_time, end_time, employee_id, operation_id, \
                       quantity_good, quantity_reject, status, comment";

pub struct ActivityRecordRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ActivityRecordRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> SqliteResult<ActivityRecord> {
        let start_raw: String = row.get(1)?;
        let end_time = row
            .get::<_, Option<String>>(2)?
            .map(|raw| datetime_from_sql(2, &raw))
            .transpose()?;

        Ok(ActivityRecord {
            id: row.get(0)?,
            start_time: datetime_from_sql(1, &start_raw)?,
            end_time,
            employee_id: row.get(3)?,
            operation_id: row.get(4)?,
            quantity_good: row.get(5)?,
            quantity_reject: row.get(6)?,
            status: row.get(7)?,
            comment: row.get(8)?,
        })
    }

    /// Insert a new activity record. Both references must exist.
    pub fn create(&self, payload: &NewActivityRecord) -> RepositoryResult<ActivityRecord> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO activity_records
                (start_time, end_time, employee_id, operation_id,
                 quantity_good, quantity_reject, status, comment)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                format_datetime(payload.start_time),
                payload.end_time.map(format_datetime),
                payload.employee_id,
                payload.operation_id,
                payload.quantity_good,
                payload.quantity_reject,
                payload.status,
                payload.comment,
            ],
        )?;

        Ok(ActivityRecord {
            id: conn.last_insert_rowid(),
            start_time: payload.start_time,
            end_time: payload.end_time,
            employee_id: payload.employee_id,
            operation_id: payload.operation_id,
            quantity_good: payload.quantity_good,
            quantity_reject: payload.quantity_reject,
            status: payload.status.clone(),
            comment: payload.comment.clone(),
        })
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ActivityRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM activity_records WHERE id = ?1"
        ))?;
        let result = stmt.query_row(params![id], Self::map_row);

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all activity records, newest start_time first
    pub fn list(&self) -> RepositoryResult<Vec<ActivityRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM activity_records ORDER BY start_time DESC"
        ))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn update(
        &self,
        record: &ActivityRecord,
        changes: &ActivityRecordUpdate,
    ) -> RepositoryResult<ActivityRecord> {
        let mut updated = record.clone();
        changes.apply_to(&mut updated);

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE activity_records
            SET start_time = ?1, end_time = ?2, employee_id = ?3, operation_id = ?4,
                quantity_good = ?5, quantity_reject = ?6, status = ?7, comment = ?8
            WHERE id = ?9
            "#,
            params![
                format_datetime(updated.start_time),
                updated.end_time.map(format_datetime),
                updated.employee_id,
                updated.operation_id,
                updated.quantity_good,
                updated.quantity_reject,
                updated.status,
                updated.comment,
                updated.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ActivityRecord",
                id: record.id.to_string(),
            });
        }
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM activity_records WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "ActivityRecord",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewEmployee, NewOperation, NewWorkOrder};
    use crate::repository::test_support::memory_conn;
    use crate::repository::{EmployeeRepository, OperationRepository, WorkOrderRepository};
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::{Arc, Mutex};

    fn ts(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn setup() -> (Arc<Mutex<Connection>>, i64, i64) {
        let conn = memory_conn();
        let employee = EmployeeRepository::new(conn.clone())
            .create(&NewEmployee {
                personnel_number: "1000".to_string(),
                first_name: "Anna".to_string(),
                last_name: "Schmidt".to_string(),
                department: None,
                role: None,
                active: true,
            })
            .unwrap();
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
        let operation = OperationRepository::new(conn.clone())
            .create(&NewOperation {
                code: "OP-10".to_string(),
                description: None,
                work_order_id: order.id,
                machine_id: None,
                standard_time_minutes: None,
                is_active: true,
            })
            .unwrap();
        (conn, employee.id, operation.id)
    }

    fn payload(start: NaiveDateTime, employee_id: i64, operation_id: i64) -> NewActivityRecord {
        NewActivityRecord {
            start_time: start,
            end_time: None,
            employee_id,
            operation_id,
            quantity_good: 40,
            quantity_reject: 1,
            status: "completed".to_string(),
            comment: None,
        }
    }

    #[test]
    fn test_create_and_roundtrip_timestamps() {
        let (conn, employee_id, operation_id) = setup();
        let repo = ActivityRecordRepository::new(conn);

        let mut new = payload(ts(3, 6), employee_id, operation_id);
        new.end_time = Some(ts(3, 14));
        let created = repo.create(&new).unwrap();

        let found = repo.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(found, created);
        assert_eq!(found.start_time, ts(3, 6));
        assert_eq!(found.end_time, Some(ts(3, 14)));
    }

    #[test]
    fn test_list_is_newest_first() {
        let (conn, employee_id, operation_id) = setup();
        let repo = ActivityRecordRepository::new(conn);

        repo.create(&payload(ts(1, 6), employee_id, operation_id))
            .unwrap();
        repo.create(&payload(ts(3, 6), employee_id, operation_id))
            .unwrap();
        repo.create(&payload(ts(2, 6), employee_id, operation_id))
            .unwrap();

        let starts: Vec<NaiveDateTime> = repo
            .list()
            .unwrap()
            .into_iter()
            .map(|r| r.start_time)
            .collect();
        assert_eq!(starts, vec![ts(3, 6), ts(2, 6), ts(1, 6)]);
    }

    #[test]
    fn test_missing_employee_reference_rejected() {
        let (conn, _, operation_id) = setup();
        let repo = ActivityRecordRepository::new(conn);
        let result = repo.create(&payload(ts(3, 6), 999, operation_id));
        assert!(matches!(
            result,
            Err(RepositoryError::ForeignKeyViolation(_))
        ));
    }
}
