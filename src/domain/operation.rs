// ==========================================
// Operation data
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::{default_true, nullable_field};

/// Operation belonging to a work order.
///
/// `code` is the natural key and unique across all operations, not scoped
/// to the owning work order. The work-order reference is required, the
/// machine reference optional. Deleting an operation cascades to its
/// activity records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: i64,
    pub code: String,
    pub description: Option<String>,
    pub work_order_id: i64,
    pub machine_id: Option<i64>,
    pub standard_time_minutes: Option<f64>,
    pub is_active: bool,
}

/// Payload for creating an operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOperation {
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
    pub work_order_id: i64,
    #[serde(default)]
    pub machine_id: Option<i64>,
    #[serde(default)]
    pub standard_time_minutes: Option<f64>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl NewOperation {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("code must not be empty".to_string());
        }
        if let Some(minutes) = self.standard_time_minutes {
            if minutes < 0.0 {
                return Err(format!(
                    "standard_time_minutes must not be negative (got {})",
                    minutes
                ));
            }
        }
        Ok(())
    }
}

/// Partial update payload; `code` is not updatable, the foreign keys are.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OperationUpdate {
    #[serde(default, deserialize_with = "nullable_field")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub work_order_id: Option<i64>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub machine_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub standard_time_minutes: Option<Option<f64>>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl OperationUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Some(minutes)) = self.standard_time_minutes {
            if minutes < 0.0 {
                return Err(format!(
                    "standard_time_minutes must not be negative (got {})",
                    minutes
                ));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, operation: &mut Operation) {
        if let Some(v) = &self.description {
            operation.description = v.clone();
        }
        if let Some(v) = self.work_order_id {
            operation.work_order_id = v;
        }
        if let Some(v) = self.machine_id {
            operation.machine_id = v;
        }
        if let Some(v) = self.standard_time_minutes {
            operation.standard_time_minutes = v;
        }
        if let Some(v) = self.is_active {
            operation.is_active = v;
        }
    }
}
