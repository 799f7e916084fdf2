// ==========================================
// MachineRepository - machine master data access
// ==========================================

use crate::domain::{Machine, MachineUpdate, NewMachine};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const COLUMNS: &str = "id, code, name, description, location, active";

pub struct MachineRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MachineRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row) -> SqliteResult<Machine> {
        Ok(Machine {
            id: row.get(0)?,
            code: row.get(1)?,
            name: row.get(2)?,
            description: row.get(3)?,
            location: row.get(4)?,
            active: row.get(5)?,
        })
    }

    pub fn create(&self, payload: &NewMachine) -> RepositoryResult<Machine> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO machines (code, name, description, location, active)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                payload.code,
                payload.name,
                payload.description,
                payload.location,
                payload.active,
            ],
        )?;

        Ok(Machine {
            id: conn.last_insert_rowid(),
            code: payload.code.clone(),
            name: payload.name.clone(),
            description: payload.description.clone(),
            location: payload.location.clone(),
            active: payload.active,
        })
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Machine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM machines WHERE id = ?1"))?;
        let result = stmt.query_row(params![id], Self::map_row);

        match result {
            Ok(machine) => Ok(Some(machine)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Machine>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("SELECT {COLUMNS} FROM machines WHERE code = ?1"))?;
        let result = stmt.query_row(params![code], Self::map_row);

        match result {
            Ok(machine) => Ok(Some(machine)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// List all machines ordered by code
    pub fn list(&self) -> RepositoryResult<Vec<Machine>> {
        let conn = self.get_conn()?;
        let mut stmt =
            conn.prepare(&format!("SELECT {COLUMNS} FROM machines ORDER BY code ASC"))?;
        let rows = stmt
            .query_map([], Self::map_row)?
            .collect::<SqliteResult<Vec<_>>>()?;
        Ok(rows)
    }

    pub fn update(&self, machine: &Machine, changes: &MachineUpdate) -> RepositoryResult<Machine> {
        let mut updated = machine.clone();
        changes.apply_to(&mut updated);

        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE machines
            SET name = ?1, description = ?2, location = ?3, active = ?4
            WHERE id = ?5
            "#,
            params![
                updated.name,
                updated.description,
                updated.location,
                updated.active,
                updated.id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Machine",
                id: machine.id.to_string(),
            });
        }
        Ok(updated)
    }

    /// Delete a machine; cascades to its operations and their activity
    /// records.
    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM machines WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "Machine",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
