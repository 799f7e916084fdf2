// ==========================================
// Machine API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Machine, MachineUpdate, NewMachine};
use crate::repository::{MachineRepository, RepositoryError};

pub struct MachineApi {
    repo: Arc<MachineRepository>,
}

impl MachineApi {
    pub fn new(repo: Arc<MachineRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> ApiResult<Vec<Machine>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Machine> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Machine not found".to_string()))
    }

    pub fn create(&self, payload: NewMachine) -> ApiResult<Machine> {
        payload.validate().map_err(ApiError::InvalidInput)?;

        let machine = self.repo.create(&payload).map_err(|e| match e {
            RepositoryError::UniqueConstraintViolation(_) => {
                ApiError::InvalidInput("Machine with this code already exists".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(id = machine.id, code = %machine.code, "machine created");
        Ok(machine)
    }

    pub fn update(&self, id: i64, changes: MachineUpdate) -> ApiResult<Machine> {
        let machine = self.get(id)?;
        let updated = self.repo.update(&machine, &changes)?;
        tracing::info!(id = updated.id, "machine updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "machine deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::memory_conn;

    #[test]
    fn test_crud_cycle() {
        let api = MachineApi::new(Arc::new(MachineRepository::new(memory_conn())));
        let created = api
            .create(NewMachine {
                code: "M-02".to_string(),
                name: "Fräse".to_string(),
                description: None,
                location: None,
                active: true,
            })
            .unwrap();

        let updated = api
            .update(
                created.id,
                MachineUpdate {
                    location: Some(Some("Halle B".to_string())),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.location.as_deref(), Some("Halle B"));

        api.delete(created.id).unwrap();
        assert!(matches!(api.get(created.id), Err(ApiError::NotFound(_))));
    }
}
