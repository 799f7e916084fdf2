// ==========================================
// Employee master data
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::{default_true, nullable_field};

/// Employee master data record.
///
/// `personnel_number` is the business natural key, unique among live rows
/// and immutable after creation. Deleting an employee cascades to the
/// activity records captured for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: i64,
    pub personnel_number: String,
    pub first_name: String,
    pub last_name: String,
    pub department: Option<String>,
    pub role: Option<String>,
    pub active: bool,
}

/// Payload for creating an employee
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEmployee {
    pub personnel_number: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub department: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl NewEmployee {
    /// Reject payloads whose required text fields are empty
    pub fn validate(&self) -> Result<(), String> {
        if self.personnel_number.trim().is_empty() {
            return Err("personnel_number must not be empty".to_string());
        }
        if self.first_name.trim().is_empty() {
            return Err("first_name must not be empty".to_string());
        }
        if self.last_name.trim().is_empty() {
            return Err("last_name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Partial update payload; the natural key is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EmployeeUpdate {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub department: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub role: Option<Option<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl EmployeeUpdate {
    /// Apply the present fields onto an existing record
    pub fn apply_to(&self, employee: &mut Employee) {
        if let Some(v) = &self.first_name {
            employee.first_name = v.clone();
        }
        if let Some(v) = &self.last_name {
            employee.last_name = v.clone();
        }
        if let Some(v) = &self.department {
            employee.department = v.clone();
        }
        if let Some(v) = &self.role {
            employee.role = v.clone();
        }
        if let Some(v) = self.active {
            employee.active = v;
        }
    }
}
