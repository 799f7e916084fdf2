// ==========================================
// Operation API
// ==========================================
// Creation and reassignment validate the referenced work order and
// machine up front so the caller gets a named reference error instead of
// a raw constraint failure.
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{NewOperation, Operation, OperationUpdate};
use crate::repository::{
    MachineRepository, OperationRepository, RepositoryError, WorkOrderRepository,
};

pub struct OperationApi {
    repo: Arc<OperationRepository>,
    work_orders: Arc<WorkOrderRepository>,
    machines: Arc<MachineRepository>,
}

impl OperationApi {
    pub fn new(
        repo: Arc<OperationRepository>,
        work_orders: Arc<WorkOrderRepository>,
        machines: Arc<MachineRepository>,
    ) -> Self {
        Self {
            repo,
            work_orders,
            machines,
        }
    }

    fn check_references(&self, work_order_id: i64, machine_id: Option<i64>) -> ApiResult<()> {
        if self.work_orders.find_by_id(work_order_id)?.is_none() {
            return Err(ApiError::InvalidInput(format!(
                "work order (id={}) does not exist",
                work_order_id
            )));
        }
        if let Some(machine_id) = machine_id {
            if self.machines.find_by_id(machine_id)?.is_none() {
                return Err(ApiError::InvalidInput(format!(
                    "machine (id={}) does not exist",
                    machine_id
                )));
            }
        }
        Ok(())
    }

    pub fn list(&self) -> ApiResult<Vec<Operation>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<Operation> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Operation not found".to_string()))
    }

    pub fn create(&self, payload: NewOperation) -> ApiResult<Operation> {
        payload.validate().map_err(ApiError::InvalidInput)?;
        self.check_references(payload.work_order_id, payload.machine_id)?;

        let operation = self.repo.create(&payload).map_err(|e| match e {
            RepositoryError::UniqueConstraintViolation(_) => {
                ApiError::InvalidInput("Operation with this code already exists".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(id = operation.id, code = %operation.code, "operation created");
        Ok(operation)
    }

    pub fn update(&self, id: i64, changes: OperationUpdate) -> ApiResult<Operation> {
        changes.validate().map_err(ApiError::InvalidInput)?;
        let operation = self.get(id)?;

        // validate the references the update would leave in place
        let work_order_id = changes.work_order_id.unwrap_or(operation.work_order_id);
        let machine_id = match changes.machine_id {
            Some(new_value) => new_value,
            None => operation.machine_id,
        };
        self.check_references(work_order_id, machine_id)?;

        let updated = self.repo.update(&operation, &changes)?;
        tracing::info!(id = updated.id, "operation updated");
        Ok(updated)
    }

    /// Delete an operation together with its activity records
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "operation deleted");
        Ok(())
    }
}
