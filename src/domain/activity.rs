// ==========================================
// Activity record data
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::nullable_field;

/// Captured production data.
///
/// Activity records have no natural key; they are identified by their
/// numeric id only. Both foreign keys are required. `end_time` should be
/// >= `start_time`, but this is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub id: i64,
    pub start_time: NaiveDateTime,
    pub end_time: Option<NaiveDateTime>,
    pub employee_id: i64,
    pub operation_id: i64,
    pub quantity_good: i64,
    pub quantity_reject: i64,
    pub status: String,
    pub comment: Option<String>,
}

fn default_status() -> String {
    "completed".to_string()
}

/// Payload for creating an activity record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewActivityRecord {
    pub start_time: NaiveDateTime,
    #[serde(default)]
    pub end_time: Option<NaiveDateTime>,
    pub employee_id: i64,
    pub operation_id: i64,
    #[serde(default)]
    pub quantity_good: i64,
    #[serde(default)]
    pub quantity_reject: i64,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub comment: Option<String>,
}

impl NewActivityRecord {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity_good < 0 {
            return Err(format!(
                "quantity_good must not be negative (got {})",
                self.quantity_good
            ));
        }
        if self.quantity_reject < 0 {
            return Err(format!(
                "quantity_reject must not be negative (got {})",
                self.quantity_reject
            ));
        }
        Ok(())
    }
}

/// Partial update payload
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ActivityRecordUpdate {
    #[serde(default)]
    pub start_time: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub end_time: Option<Option<NaiveDateTime>>,
    #[serde(default)]
    pub employee_id: Option<i64>,
    #[serde(default)]
    pub operation_id: Option<i64>,
    #[serde(default)]
    pub quantity_good: Option<i64>,
    #[serde(default)]
    pub quantity_reject: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub comment: Option<Option<String>>,
}

impl ActivityRecordUpdate {
    pub fn validate(&self) -> Result<(), String> {
        if let Some(quantity) = self.quantity_good {
            if quantity < 0 {
                return Err(format!(
                    "quantity_good must not be negative (got {})",
                    quantity
                ));
            }
        }
        if let Some(quantity) = self.quantity_reject {
            if quantity < 0 {
                return Err(format!(
                    "quantity_reject must not be negative (got {})",
                    quantity
                ));
            }
        }
        Ok(())
    }

    pub fn apply_to(&self, record: &mut ActivityRecord) {
        if let Some(v) = self.start_time {
            record.start_time = v;
        }
        if let Some(v) = self.end_time {
            record.end_time = v;
        }
        if let Some(v) = self.employee_id {
            record.employee_id = v;
        }
        if let Some(v) = self.operation_id {
            record.operation_id = v;
        }
        if let Some(v) = self.quantity_good {
            record.quantity_good = v;
        }
        if let Some(v) = self.quantity_reject {
            record.quantity_reject = v;
        }
        if let Some(v) = &self.status {
            record.status = v.clone();
        }
        if let Some(v) = &self.comment {
            record.comment = v.clone();
        }
    }
}
