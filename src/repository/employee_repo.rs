// ==========================================
// EmployeeRepository - employee master data access
// ==========================================

use crate::domain::{Employee, EmployeeUpdate, NewEmployee};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const COLUMNS: &str = "id, personnel_number, first_name, last_name, department, role, active";

pub struct EmployeeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl EmployeeRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> SqliteResult<Employee> {
        Ok(Employee {
            id: row.get(0)?,
            personnel_number: row.get(1)?,
            first_name: row.get(2)?,
            last_name: row.get(3)?,
            department: row.get(4)?,
            role: row.get(5)?,
            active: row.get(6)?,
        })
    }

    /// Insert a new employee; a colliding personnel number surfaces as
    /// `UniqueConstraintViolation`.
    pub fn create(&self, payload: &NewEmployee) -> RepositoryResult<Employee> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO employees (personnel_number, first_name, last_name, department, role, active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                payload.personnel_number,
                payload.first_name,
                payload.last_name,
                payload.department,
                payload.role,
                payload.active,
            ],
        )?;

        Ok(Employee {
            id: conn.last_insert_rowid(),
            personnel_number: payload.personnel_number.clone(),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            department: payload.department.clone(),
            role: payload.role.clone(),
            active: payload.active,
        })
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM employees WHERE id = ?1"))?;
        let result = stmt.query_row(params![id], Self::map_row);

        match result {
            Ok(employee) => Ok(Some(employee)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_personnel_number(
        &self,
        personnel_number: &str,
    ) -> RepositoryResult<Option<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM employees WHERE personnel_number = ?1"
        ))?;
        let result = stmt.query_row(params![personnel_number], Self::map_row);

        match result {
            Ok(employee) => Ok(Some(employee)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all employees ordered by personnel number
    pub fn list(&self) -> RepositoryResult<Vec<Employee>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COLUMNS} FROM employees ORDER BY personnel_number ASC"
        ))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    /// Apply the present fields of `changes` and write the full row back.
    /// The personnel number is never touched.
    pub fn update(
        &self,
        employee: &Employee,
        changes: &EmployeeUpdate,
    ) -> RepositoryResult<Employee> {
        let mut updated = employee.clone();
        changes.apply_to(&mut updated);

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE employees
            SET first_name = ?1, last_name = ?2, department = ?3, role = ?4, active = ?5
            WHERE id = ?6
            "#,
            params![
                updated.first_name,
                updated.last_name,
                updated.department,
                updated.role,
                updated.active,
                updated.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee",
                id: employee.id.to_string(),
            });
        }
        Ok(updated)
    }

    /// Delete an employee; cascades to their activity records.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM employees WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Employee",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
