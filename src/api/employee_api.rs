// ==========================================
// Employee API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Employee, EmployeeUpdate, NewEmployee};
use crate::repository::{EmployeeRepository, RepositoryError};

pub struct EmployeeApi {
    repo: Arc<EmployeeRepository>,
}

impl EmployeeApi {
    pub fn new(repo: Arc<EmployeeRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> ApiResult<Vec<Employee>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Employee> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Employee not found".to_string()))
    }

    pub fn create(&self, payload: NewEmployee) -> ApiResult<Employee> {
        payload.validate().map_err(ApiError::InvalidInput)?;

        let employee = self.repo.create(&payload).map_err(|e| match e {
            RepositoryError::UniqueConstraintViolation(_) => ApiError::InvalidInput(
                "Employee with this personnel number already exists".to_string(),
            ),
            other => other.into(),
        })?;

        tracing::info!(
            id = employee.id,
            personnel_number = %employee.personnel_number,
            "employee created"
        );
        Ok(employee)
    }

    pub fn update(&self, id: i64, changes: EmployeeUpdate) -> ApiResult<Employee> {
        let employee = self.get(id)?;
        let updated = self.repo.update(&employee, &changes)?;
        tracing::info!(id = updated.id, "employee updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        // existence check first so the caller gets a clean not-found
        self.get(id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "employee deleted");
        Ok(())
    }
}
