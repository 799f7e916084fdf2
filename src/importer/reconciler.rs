// ==========================================
// IWS BDE Plattform - CSV reconciliation
// ==========================================
// Matches incoming rows to existing records by natural key and decides
// insert vs. update. Rows are persisted one by one; the first row error
// aborts the file and leaves previously applied rows in place.
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{
    ActivityRecordUpdate, EmployeeUpdate, EntityKind, MachineUpdate, NewActivityRecord,
    NewEmployee, NewMachine, NewOperation, NewWorkOrder, OperationUpdate, WorkOrderUpdate,
};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{CsvParser, RawRecord};
use crate::importer::value_parser::{
    optional_text, parse_bool, parse_date, parse_datetime, parse_int, parse_non_negative_float,
    parse_non_negative_int, required_text,
};
use crate::repository::{
    ActivityRecordRepository, EmployeeRepository, MachineRepository, OperationRepository,
    WorkOrderRepository,
};

/// Result of one CSV import call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportSummary {
    pub inserted: u64,
    pub updated: u64,
}

/// CSV import engine over the five entity stores.
///
/// Callers are responsible for importing in dependency order: employees,
/// machines and work orders first, then operations, then activity records.
/// Rows referencing a natural key that is not in the store yet fail.
pub struct CsvImporter {
    employees: Arc<EmployeeRepository>,
    machines: Arc<MachineRepository>,
    work_orders: Arc<WorkOrderRepository>,
    operations: Arc<OperationRepository>,
    activities: Arc<ActivityRecordRepository>,
    parser: CsvParser,
}

impl CsvImporter {
    pub fn new(
        employees: Arc<EmployeeRepository>,
        machines: Arc<MachineRepository>,
        work_orders: Arc<WorkOrderRepository>,
        operations: Arc<OperationRepository>,
        activities: Arc<ActivityRecordRepository>,
    ) -> Self {
        Self {
            employees,
            machines,
            work_orders,
            operations,
            activities,
            parser: CsvParser,
        }
    }

    /// Import a CSV payload for the given entity kind
    pub fn import(&self, kind: EntityKind, csv_text: &str) -> ImportResult<ImportSummary> {
        let summary = match kind {
            EntityKind::Employees => self.import_employees(csv_text),
            EntityKind::Machines => self.import_machines(csv_text),
            EntityKind::WorkOrders => self.import_work_orders(csv_text),
            EntityKind::Operations => self.import_operations(csv_text),
            EntityKind::ActivityRecords => self.import_activity_records(csv_text),
        }?;

        tracing::info!(
            entity = kind.as_str(),
            inserted = summary.inserted,
            updated = summary.updated,
            "CSV import finished"
        );
        Ok(summary)
    }

    /// Rows with their 1-based file line number (header is line 1)
    fn rows(&self, csv_text: &str) -> ImportResult<Vec<(usize, RawRecord)>> {
        Ok(self
            .parser
            .parse_str(csv_text)?
            .into_iter()
            .enumerate()
            .map(|(idx, record)| (idx + 2, record))
            .collect())
    }

    pub fn import_employees(&self, csv_text: &str) -> ImportResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (row, record) in self.rows(csv_text)? {
            let personnel_number = required_text(&record, "personnel_number", row)?;
            let payload = NewEmployee {
                personnel_number: personnel_number.clone(),
                first_name: required_text(&record, "first_name", row)?,
                last_name: required_text(&record, "last_name", row)?,
                department: optional_text(&record, "department"),
                role: optional_text(&record, "role"),
                active: parse_bool(&record, "active", true),
            };

            match self.employees.find_by_personnel_number(&personnel_number)? {
                Some(existing) => {
                    let changes = EmployeeUpdate {
                        first_name: Some(payload.first_name),
                        last_name: Some(payload.last_name),
                        department: Some(payload.department),
                        role: Some(payload.role),
                        active: Some(payload.active),
                    };
                    // only count rows whose values actually change
                    let mut merged = existing.clone();
                    changes.apply_to(&mut merged);
                    if merged != existing {
                        self.employees.update(&existing, &changes)?;
                        summary.updated += 1;
                    }
                }
                None => {
                    self.employees.create(&payload)?;
                    summary.inserted += 1;
                }
            }
        }

        Ok(summary)
    }

    pub fn import_machines(&self, csv_text: &str) -> ImportResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (row, record) in self.rows(csv_text)? {
            let code = required_text(&record, "code", row)?;
            let payload = NewMachine {
                code: code.clone(),
                name: required_text(&record, "name", row)?,
                description: optional_text(&record, "description"),
                location: optional_text(&record, "location"),
                active: parse_bool(&record, "active", true),
            };

            match self.machines.find_by_code(&code)? {
                Some(existing) => {
                    let changes = MachineUpdate {
                        name: Some(payload.name),
                        description: Some(payload.description),
                        location: Some(payload.location),
                        active: Some(payload.active),
                    };
                    let mut merged = existing.clone();
                    changes.apply_to(&mut merged);
                    if merged != existing {
                        self.machines.update(&existing, &changes)?;
                        summary.updated += 1;
                    }
                }
                None => {
                    self.machines.create(&payload)?;
                    summary.inserted += 1;
                }
            }
        }

        Ok(summary)
    }

    pub fn import_work_orders(&self, csv_text: &str) -> ImportResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (row, record) in self.rows(csv_text)? {
            let order_number = required_text(&record, "order_number", row)?;
            let payload = NewWorkOrder {
                order_number: order_number.clone(),
                customer: optional_text(&record, "customer"),
                article: optional_text(&record, "article"),
                quantity: parse_non_negative_int(&record, "quantity", row)?,
                due_date: parse_date(&record, "due_date", row)?,
                status: optional_text(&record, "status").unwrap_or_else(|| "open".to_string()),
            };

            match self.work_orders.find_by_order_number(&order_number)? {
                Some(existing) => {
                    let changes = WorkOrderUpdate {
                        customer: Some(payload.customer),
                        article: Some(payload.article),
                        quantity: Some(payload.quantity),
                        due_date: Some(payload.due_date),
                        status: Some(payload.status),
                    };
                    let mut merged = existing.clone();
                    changes.apply_to(&mut merged);
                    if merged != existing {
                        self.work_orders.update(&existing, &changes)?;
                        summary.updated += 1;
                    }
                }
                None => {
                    self.work_orders.create(&payload)?;
                    summary.inserted += 1;
                }
            }
        }

        Ok(summary)
    }

    pub fn import_operations(&self, csv_text: &str) -> ImportResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (row, record) in self.rows(csv_text)? {
            let code = required_text(&record, "code", row)?;

            // resolve the work-order reference before touching the store
            let order_number = required_text(&record, "order_number", row)?;
            let work_order = self
                .work_orders
                .find_by_order_number(&order_number)?
                .ok_or_else(|| ImportError::ReferenceNotFound {
                    row,
                    entity: "work order",
                    key: order_number.clone(),
                    context: format!("operation {}", code),
                })?;

            let machine_id = match optional_text(&record, "machine_code") {
                Some(machine_code) => Some(
                    self.machines
                        .find_by_code(&machine_code)?
                        .ok_or_else(|| ImportError::ReferenceNotFound {
                            row,
                            entity: "machine",
                            key: machine_code.clone(),
                            context: format!("operation {}", code),
                        })?
                        .id,
                ),
                None => None,
            };

            let payload = NewOperation {
                code: code.clone(),
                description: optional_text(&record, "description"),
                work_order_id: work_order.id,
                machine_id,
                standard_time_minutes: parse_non_negative_float(
                    &record,
                    "standard_time_minutes",
                    row,
                )?,
                is_active: parse_bool(&record, "is_active", true),
            };

            match self.operations.find_by_code(&code)? {
                Some(existing) => {
                    let changes = OperationUpdate {
                        description: Some(payload.description),
                        work_order_id: Some(payload.work_order_id),
                        machine_id: Some(payload.machine_id),
                        standard_time_minutes: Some(payload.standard_time_minutes),
                        is_active: Some(payload.is_active),
                    };
                    let mut merged = existing.clone();
                    changes.apply_to(&mut merged);
                    if merged != existing {
                        self.operations.update(&existing, &changes)?;
                        summary.updated += 1;
                    }
                }
                None => {
                    self.operations.create(&payload)?;
                    summary.inserted += 1;
                }
            }
        }

        Ok(summary)
    }

    pub fn import_activity_records(&self, csv_text: &str) -> ImportResult<ImportSummary> {
        let mut summary = ImportSummary::default();

        for (row, record) in self.rows(csv_text)? {
            let start_time = parse_datetime(&record, "start_time", row)?.ok_or(
                ImportError::MissingField {
                    row,
                    field: "start_time",
                },
            )?;

            let personnel_number = required_text(&record, "personnel_number", row)?;
            let employee = self
                .employees
                .find_by_personnel_number(&personnel_number)?
                .ok_or_else(|| ImportError::ReferenceNotFound {
                    row,
                    entity: "employee",
                    key: personnel_number.clone(),
                    context: "activity record".to_string(),
                })?;

            let operation_code = required_text(&record, "operation_code", row)?;
            let operation = self
                .operations
                .find_by_code(&operation_code)?
                .ok_or_else(|| ImportError::ReferenceNotFound {
                    row,
                    entity: "operation",
                    key: operation_code.clone(),
                    context: "activity record".to_string(),
                })?;

            let payload = NewActivityRecord {
                start_time,
                end_time: parse_datetime(&record, "end_time", row)?,
                employee_id: employee.id,
                operation_id: operation.id,
                quantity_good: parse_non_negative_int(&record, "quantity_good", row)?.unwrap_or(0),
                quantity_reject: parse_non_negative_int(&record, "quantity_reject", row)?
                    .unwrap_or(0),
                status: optional_text(&record, "status").unwrap_or_else(|| "completed".to_string()),
                comment: optional_text(&record, "comment"),
            };

            // an id cell selects the update path; empty means insert
            let record_id = parse_int(&record, "id", row)?.filter(|id| *id > 0);
            match record_id {
                Some(id) => {
                    let existing = self
                        .activities
                        .find_by_id(id)?
                        .ok_or(ImportError::RecordNotFound { row, id })?;
                    let changes = ActivityRecordUpdate {
                        start_time: Some(payload.start_time),
                        end_time: Some(payload.end_time),
                        employee_id: Some(payload.employee_id),
                        operation_id: Some(payload.operation_id),
                        quantity_good: Some(payload.quantity_good),
                        quantity_reject: Some(payload.quantity_reject),
                        status: Some(payload.status),
                        comment: Some(payload.comment),
                    };
                    let mut merged = existing.clone();
                    changes.apply_to(&mut merged);
                    if merged != existing {
                        self.activities.update(&existing, &changes)?;
                        summary.updated += 1;
                    }
                }
                None => {
                    self.activities.create(&payload)?;
                    summary.inserted += 1;
                }
            }
        }

        Ok(summary)
    }
}
