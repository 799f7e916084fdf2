// ==========================================
// IWS BDE Plattform - entity CSV export
// ==========================================
// One export per entity kind with a fixed column order. Foreign keys are
// denormalized to their natural-key text form via id lookup maps built
// from the store.
// ==========================================

use std::collections::HashMap;
use std::sync::Arc;

use crate::domain::EntityKind;
use crate::exporter::csv_writer::{
    format_bool, format_datetime, format_opt_date, format_opt_datetime, format_opt_float,
    format_opt_int, format_opt_text, write_csv,
};
use crate::exporter::ExportResult;
use crate::repository::{
    ActivityRecordRepository, EmployeeRepository, MachineRepository, OperationRepository,
    WorkOrderRepository,
};

pub const EMPLOYEE_COLUMNS: [&str; 6] = [
    "personnel_number",
    "first_name",
    "last_name",
    "department",
    "role",
    "active",
];

pub const MACHINE_COLUMNS: [&str; 5] = ["code", "name", "description", "location", "active"];

pub const WORK_ORDER_COLUMNS: [&str; 6] = [
    "order_number",
    "customer",
    "article",
    "quantity",
    "due_date",
    "status",
];

pub const OPERATION_COLUMNS: [&str; 6] = [
    "code",
    "description",
    "order_number",
    "machine_code",
    "standard_time_minutes",
    "is_active",
];

pub const ACTIVITY_COLUMNS: [&str; 9] = [
    "id",
    "start_time",
    "end_time",
    "personnel_number",
    "operation_code",
    "quantity_good",
    "quantity_reject",
    "status",
    "comment",
];

/// CSV export engine over the five entity stores
pub struct CsvExporter {
    employees: Arc<EmployeeRepository>,
    machines: Arc<MachineRepository>,
    work_orders: Arc<WorkOrderRepository>,
    operations: Arc<OperationRepository>,
    activities: Arc<ActivityRecordRepository>,
}

impl CsvExporter {
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
        }
    }

    /// Export the given entity kind as one CSV document
    pub fn export(&self, kind: EntityKind) -> ExportResult<String> {
        match kind {
            EntityKind::Employees => self.export_employees(),
            EntityKind::Machines => self.export_machines(),
            EntityKind::WorkOrders => self.export_work_orders(),
            EntityKind::Operations => self.export_operations(),
            EntityKind::ActivityRecords => self.export_activity_records(),
        }
    }

    pub fn export_employees(&self) -> ExportResult<String> {
        let rows = self
            .employees
            .list()?
            .into_iter()
            .map(|e| {
                vec![
                    e.personnel_number,
                    e.first_name,
                    e.last_name,
                    format_opt_text(e.department.as_deref()),
                    format_opt_text(e.role.as_deref()),
                    format_bool(e.active),
                ]
            })
            .collect();
        write_csv(&EMPLOYEE_COLUMNS, rows)
    }

    pub fn export_machines(&self) -> ExportResult<String> {
        let rows = self
            .machines
            .list()?
            .into_iter()
            .map(|m| {
                vec![
                    m.code,
                    m.name,
                    format_opt_text(m.description.as_deref()),
                    format_opt_text(m.location.as_deref()),
                    format_bool(m.active),
                ]
            })
            .collect();
        write_csv(&MACHINE_COLUMNS, rows)
    }

    pub fn export_work_orders(&self) -> ExportResult<String> {
        let rows = self
            .work_orders
            .list()?
            .into_iter()
            .map(|w| {
                vec![
                    w.order_number,
                    format_opt_text(w.customer.as_deref()),
                    format_opt_text(w.article.as_deref()),
                    format_opt_int(w.quantity),
                    format_opt_date(w.due_date),
                    w.status,
                ]
            })
            .collect();
        write_csv(&WORK_ORDER_COLUMNS, rows)
    }

    pub fn export_operations(&self) -> ExportResult<String> {
        let order_numbers: HashMap<i64, String> = self
            .work_orders
            .list()?
            .into_iter()
            .map(|w| (w.id, w.order_number))
            .collect();
        let machine_codes: HashMap<i64, String> = self
            .machines
            .list()?
            .into_iter()
            .map(|m| (m.id, m.code))
            .collect();

        let rows = self
            .operations
            .list()?
            .into_iter()
            .map(|o| {
                vec![
                    o.code,
                    format_opt_text(o.description.as_deref()),
                    order_numbers.get(&o.work_order_id).cloned().unwrap_or_default(),
                    o.machine_id
                        .and_then(|id| machine_codes.get(&id).cloned())
                        .unwrap_or_default(),
                    format_opt_float(o.standard_time_minutes),
                    format_bool(o.is_active),
                ]
            })
            .collect();
        write_csv(&OPERATION_COLUMNS, rows)
    }

    pub fn export_activity_records(&self) -> ExportResult<String> {
        let personnel_numbers: HashMap<i64, String> = self
            .employees
            .list()?
            .into_iter()
            .map(|e| (e.id, e.personnel_number))
            .collect();
        let operation_codes: HashMap<i64, String> = self
            .operations
            .list()?
            .into_iter()
            .map(|o| (o.id, o.code))
            .collect();

        let rows = self
            .activities
            .list()?
            .into_iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    format_datetime(r.start_time),
                    format_opt_datetime(r.end_time),
                    personnel_numbers
                        .get(&r.employee_id)
                        .cloned()
                        .unwrap_or_default(),
                    operation_codes
                        .get(&r.operation_id)
                        .cloned()
                        .unwrap_or_default(),
                    r.quantity_good.to_string(),
                    r.quantity_reject.to_string(),
                    r.status,
                    format_opt_text(r.comment.as_deref()),
                ]
            })
            .collect();
        write_csv(&ACTIVITY_COLUMNS, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NewMachine, NewOperation, NewWorkOrder};
    use crate::repository::test_support::memory_conn;

    fn exporter_with_data() -> CsvExporter {
        let conn = memory_conn();
        let machines = Arc::new(MachineRepository::new(conn.clone()));
        let work_orders = Arc::new(WorkOrderRepository::new(conn.clone()));
        let operations = Arc::new(OperationRepository::new(conn.clone()));

        let machine = machines
            .create(&NewMachine {
                code: "M-02".to_string(),
                name: "Fräse".to_string(),
                description: Some("Hochgeschwindigkeitsfräse".to_string()),
                location: Some("Halle B".to_string()),
                active: true,
            })
            .unwrap();
        let order = work_orders
            .create(&NewWorkOrder {
                order_number: "WO-1".to_string(),
                customer: None,
                article: None,
                quantity: None,
                due_date: None,
                status: "open".to_string(),
            })
            .unwrap();
        operations
            .create(&NewOperation {
                code: "OP-10".to_string(),
                description: None,
                work_order_id: order.id,
                machine_id: Some(machine.id),
                standard_time_minutes: Some(12.5),
                is_active: true,
            })
            .unwrap();
        operations
            .create(&NewOperation {
                code: "OP-20".to_string(),
                description: None,
                work_order_id: order.id,
                machine_id: None,
                standard_time_minutes: None,
                is_active: false,
            })
            .unwrap();

        CsvExporter::new(
            Arc::new(EmployeeRepository::new(conn.clone())),
            machines,
            work_orders,
            operations,
            Arc::new(ActivityRecordRepository::new(conn.clone())),
        )
    }

    #[test]
    fn test_machine_export_has_fixed_header_and_values() {
        let exporter = exporter_with_data();
        let document = exporter.export_machines().unwrap();

        let mut lines = document.lines();
        assert_eq!(lines.next(), Some("code,name,description,location,active"));
        assert_eq!(
            lines.next(),
            Some("M-02,Fräse,Hochgeschwindigkeitsfräse,Halle B,true")
        );
    }

    #[test]
    fn test_operation_export_denormalizes_references() {
        let exporter = exporter_with_data();
        let document = exporter.export_operations().unwrap();

        let mut lines = document.lines();
        assert_eq!(
            lines.next(),
            Some("code,description,order_number,machine_code,standard_time_minutes,is_active")
        );
        // machine reference present
        assert_eq!(lines.next(), Some("OP-10,,WO-1,M-02,12.5,true"));
        // machine reference absent renders as empty field
        assert_eq!(lines.next(), Some("OP-20,,WO-1,,,false"));
    }

    #[test]
    fn test_empty_store_exports_header_only() {
        let exporter = exporter_with_data();
        let document = exporter.export_employees().unwrap();
        assert_eq!(
            document,
            "personnel_number,first_name,last_name,department,role,active\n"
        );
    }
}
