// ==========================================
// Work order data
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::nullable_field;

/// Production work order.
///
/// `order_number` is the natural key. Deleting a work order cascades to
/// its operations (and transitively to their activity records).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: i64,
    pub order_number: String,
    pub customer: Option<String>,
    pub article: Option<String>,
    pub quantity: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub status: String,
}

fn default_status() -> String {
    "open".to_string()
}

/// Payload for creating a work order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewWorkOrder {
    pub order_number: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub article: Option<String>,
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default = "default_status")]
    pub status: String,
}

impl NewWorkOrder {
    pub fn validate(&self) -> Result<(), String> {
        if self.order_number.trim().is_empty() {
            return Err("order_number must not be empty".to_string());
        }
        if let Some(quantity) = self.quantity {
            if quantity < 0 {
                return Err(format!("quantity must not be negative (got {})", quantity));
            }
        }
        Ok(())
    }
}

/// Partial update payload; `order_number` is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WorkOrderUpdate {
    #[serde(default, deserialize_with = "nullable_field")]
    pub customer: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub article: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub quantity: Option<Option<i64>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(default)]
    pub status: Option<String>,
}

impl WorkOrderUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(Some(quantity)) = self.quantity {
            if quantity < 0 {
                return Err(format!("quantity must not be negative (got {})", quantity));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, order: &mut WorkOrder) {
        if let Some(v) = &self.customer {
            order.customer = v.clone();
        }
        if let Some(v) = &self.article {
            order.article = v.clone();
        }
        if let Some(v) = self.quantity {
            order.quantity = v;
        }
        if let Some(v) = self.due_date {
            order.due_date = v;
        }
        if let Some(v) = &self.status {
            order.status = v.clone();
        }
    }
}
