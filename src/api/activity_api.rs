// ==========================================
// Activity record API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ActivityRecord, ActivityRecordUpdate, NewActivityRecord};
use crate::repository::{ActivityRecordRepository, EmployeeRepository, OperationRepository};

pub struct ActivityApi {
    repo: Arc<ActivityRecordRepository>,
    employees: Arc<EmployeeRepository>,
    operations: Arc<OperationRepository>,
}

impl ActivityApi {
    pub fn new(
        repo: Arc<ActivityRecordRepository>,
        employees: Arc<EmployeeRepository>,
        operations: Arc<OperationRepository>,
    ) -> Self {
        Self {
            repo,
            employees,
            operations,
        }
    }

    fn check_references(&self, employee_id: i64, operation_id: i64) -> ApiResult<()> {
        if self.employees.find_by_id(employee_id)?.is_none() {
            return Err(ApiError::InvalidInput(format!(
                "employee (id={}) does not exist",
                employee_id
            )));
        }
        if self.operations.find_by_id(operation_id)?.is_none() {
            return Err(ApiError::InvalidInput(format!(
                "operation (id={}) does not exist",
                operation_id
            )));
        }
        Ok(())
    }

    pub fn list(&self) -> ApiResult<Vec<ActivityRecord>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<ActivityRecord> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Activity record not found".to_string()))
    }

    pub fn create(&self, payload: NewActivityRecord) -> ApiResult<ActivityRecord> {
        payload.validate().map_err(ApiError::InvalidInput)?;
        self.check_references(payload.employee_id, payload.operation_id)?;

        let record = self.repo.create(&payload)?;
        tracing::info!(id = record.id, "activity record created");
        Ok(record)
    }

    pub fn update(&self, id: i64, changes: ActivityRecordUpdate) -> ApiResult<ActivityRecord> {
        changes.validate().map_err(ApiError::InvalidInput)?;
        let record = self.get(id)?;

        let employee_id = changes.employee_id.unwrap_or(record.employee_id);
        let operation_id = changes.operation_id.unwrap_or(record.operation_id);
        self.check_references(employee_id, operation_id)?;

        let updated = self.repo.update(&record, &changes)?;
        tracing::info!(id = updated.id, "activity record updated");
        Ok(updated)
    }

    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "activity record deleted");
        Ok(())
    }
}
