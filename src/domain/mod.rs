// ==========================================
// IWS BDE Plattform - domain layer
// ==========================================
// Entities carry the store-assigned id plus their business natural key.
// Each entity has a construction payload (New*) and a partial-update
// payload (*Update) whose fields are only applied when present.
// ==========================================

pub mod activity;
pub mod employee;
pub mod machine;
pub mod operation;
pub mod work_order;

pub use activity::{ActivityRecord, ActivityRecordUpdate, NewActivityRecord};
pub use employee::{Employee, EmployeeUpdate, NewEmployee};
pub use machine::{Machine, MachineUpdate, NewMachine};
pub use operation::{NewOperation, Operation, OperationUpdate};
pub use work_order::{NewWorkOrder, WorkOrder, WorkOrderUpdate};

use serde::{Deserialize, Deserializer};

/// The five entity kinds of the BDE data model, keyed by their CSV
/// exchange names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Employees,
    Machines,
    WorkOrders,
    Operations,
    ActivityRecords,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Employees => "employees",
            EntityKind::Machines => "machines",
            EntityKind::WorkOrders => "work_orders",
            EntityKind::Operations => "operations",
            EntityKind::ActivityRecords => "activity_records",
        }
    }

    /// Parse a CSV exchange name ("employees", "machines", ...)
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "employees" => Some(EntityKind::Employees),
            "machines" => Some(EntityKind::Machines),
            "work_orders" => Some(EntityKind::WorkOrders),
            "operations" => Some(EntityKind::Operations),
            "activity_records" => Some(EntityKind::ActivityRecords),
            _ => None,
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// serde default helper for boolean flags that default to true
pub(crate) fn default_true() -> bool {
    true
}

/// Deserialize a nullable update field.
///
/// An absent field stays `None` (leave the stored value untouched), an
/// explicit JSON null becomes `Some(None)` (clear the stored value).
pub(crate) fn nullable_field<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}
