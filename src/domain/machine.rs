// ==========================================
// Machine master data
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::{default_true, nullable_field};

/// Machine master data record.
///
/// `code` is the natural key. Deleting a machine cascades to the
/// operations assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub active: bool,
}

/// Payload for creating a machine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewMachine {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default = "default_true")]
    pub active: bool,
}

impl NewMachine {
    pub fn validate(&self) -> Result<(), String> {
        if self.code.trim().is_empty() {
            return Err("code must not be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }
}

/// Partial update payload; `code` is not updatable.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MachineUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "nullable_field")]
    pub location: Option<Option<String>>,
    #[serde(default)]
    pub active: Option<bool>,
}

impl MachineUpdate {
    pub fn apply_to(&self, machine: &mut Machine) {
        if let Some(v) = &self.name {
            machine.name = v.clone();
        }
        if let Some(v) = &self.description {
            machine.description = v.clone();
        }
        if let Some(v) = &self.location {
            machine.location = v.clone();
        }
        if let Some(v) = self.active {
            machine.active = v;
        }
    }
}
