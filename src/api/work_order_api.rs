// ==========================================
// Work order API
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{NewWorkOrder, WorkOrder, WorkOrderUpdate};
use crate::repository::{RepositoryError, WorkOrderRepository};

pub struct WorkOrderApi {
    repo: Arc<WorkOrderRepository>,
}

impl WorkOrderApi {
    pub fn new(repo: Arc<WorkOrderRepository>) -> Self {
        Self { repo }
    }

    pub fn list(&self) -> ApiResult<Vec<WorkOrder>> {
        Ok(self.repo.list()?)
    }

    pub fn get(&self, id: i64) -> ApiResult<WorkOrder> {
        self.repo
            .find_by_id(id)?
            .ok_or_else(|| ApiError::NotFound("Work order not found".to_string()))
    }

    pub fn create(&self, payload: NewWorkOrder) -> ApiResult<WorkOrder> {
        payload.validate().map_err(ApiError::InvalidInput)?;

        let order = self.repo.create(&payload).map_err(|e| match e {
            RepositoryError::UniqueConstraintViolation(_) => {
                ApiError::InvalidInput("Work order with this number already exists".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(id = order.id, order_number = %order.order_number, "work order created");
        Ok(order)
    }

    pub fn update(&self, id: i64, changes: WorkOrderUpdate) -> ApiResult<WorkOrder> {
        changes.validate().map_err(ApiError::InvalidInput)?;
        let order = self.get(id)?;
        let updated = self.repo.update(&order, &changes)?;
        tracing::info!(id = updated.id, "work order updated");
        Ok(updated)
    }

    /// Delete a work order together with its operations and their activity
    /// records.
    pub fn delete(&self, id: i64) -> ApiResult<()> {
        self.get(id)?;
        self.repo.delete(id)?;
        tracing::info!(id, "work order deleted");
        Ok(())
    }
}
