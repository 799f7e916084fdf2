// ==========================================
// Integration tests - CSV import reconciliation
// ==========================================
// Covers the upsert semantics, cross-entity reference resolution, the
// documented partial-commit-on-failure behavior and the boolean token
// table.
// ==========================================


use iws_bde::domain::EntityKind;
use iws_bde::importer::{ImportError, ImportSummary};
use test_helpers::{seed_via_import, test_repos, ACTIVITY_CSV, MACHINE_CSV, OPERATION_CSV};

#[test]
fn test_full_import_in_dependency_order() {
    let repos = test_repos();
    let importer = repos.importer();

    let employees = importer
        .import(EntityKind::Employees, test_helpers::EMPLOYEE_CSV)
        .unwrap();
    let machines = importer.import(EntityKind::Machines, MACHINE_CSV).unwrap();
    let orders = importer
        .import(EntityKind::WorkOrders, test_helpers::WORK_ORDER_CSV)
        .unwrap();
    let operations = importer
        .import(EntityKind::Operations, OPERATION_CSV)
        .unwrap();
    let activities = importer
        .import(EntityKind::ActivityRecords, ACTIVITY_CSV)
        .unwrap();

    assert_eq!(employees, ImportSummary { inserted: 2, updated: 0 });
    assert_eq!(machines, ImportSummary { inserted: 2, updated: 0 });
    assert_eq!(orders, ImportSummary { inserted: 2, updated: 0 });
    assert_eq!(operations, ImportSummary { inserted: 3, updated: 0 });
    assert_eq!(activities, ImportSummary { inserted: 2, updated: 0 });

    // defaults applied where the file left cells empty
    let order = repos
        .work_orders
        .find_by_order_number("WO-101")
        .unwrap()
        .unwrap();
    assert_eq!(order.status, "open");
    assert_eq!(order.quantity, None);
}

#[test]
fn test_machine_example_scenario() {
    let repos = test_repos();
    let importer = repos.importer();

    let summary = importer
        .import(
            EntityKind::Machines,
            "code,name,description,location,active\n\
             M-02,Fräse,Hochgeschwindigkeitsfräse,Halle B,true\n",
        )
        .unwrap();
    assert_eq!(summary, ImportSummary { inserted: 1, updated: 0 });

    let export = repos.exporter().export_machines().unwrap();
    assert!(export.contains("M-02,Fräse,Hochgeschwindigkeitsfräse,Halle B,true"));
}

#[test]
fn test_employee_role_update_keeps_identity() {
    let repos = test_repos();
    let importer = repos.importer();

    let created = repos
        .employees
        .create(&iws_bde::domain::NewEmployee {
            personnel_number: "1000".to_string(),
            first_name: "Anna".to_string(),
            last_name: "Schmidt".to_string(),
            department: None,
            role: Some("Werker".to_string()),
            active: true,
        })
        .unwrap();

    let summary = importer
        .import(
            EntityKind::Employees,
            "personnel_number,first_name,last_name,department,role,active\n\
             1000,Anna,Schmidt,,Schichtleiter,true\n",
        )
        .unwrap();
    assert_eq!(summary, ImportSummary { inserted: 0, updated: 1 });

    let employee = repos
        .employees
        .find_by_personnel_number("1000")
        .unwrap()
        .unwrap();
    assert_eq!(employee.id, created.id);
    assert_eq!(employee.personnel_number, "1000");
    assert_eq!(employee.role.as_deref(), Some("Schichtleiter"));
}

#[test]
fn test_import_update_clears_emptied_optional_fields() {
    let repos = test_repos();
    let importer = repos.importer();
    seed_via_import(&repos);

    // M-02 loses its description when the cell comes back empty
    importer
        .import(
            EntityKind::Machines,
            "code,name,description,location,active\nM-02,Fräse,,Halle B,true\n",
        )
        .unwrap();

    let machine = repos.machines.find_by_code("M-02").unwrap().unwrap();
    assert_eq!(machine.description, None);
}

#[test]
fn test_operation_rows_after_failure_are_not_applied() {
    let repos = test_repos();
    let importer = repos.importer();
    importer
        .import(EntityKind::WorkOrders, test_helpers::WORK_ORDER_CSV)
        .unwrap();
    importer.import(EntityKind::Machines, MACHINE_CSV).unwrap();

    let result = importer.import(
        EntityKind::Operations,
        "code,description,order_number,machine_code,standard_time_minutes,is_active\n\
         OP-10,Drehen,WO-100,M-01,12.5,true\n\
         OP-20,Fräsen,WO-404,M-02,8,true\n\
         OP-30,Entgraten,WO-100,,2,true\n",
    );

    let err = result.unwrap_err();
    assert!(err.to_string().contains("WO-404"));
    assert!(err.to_string().contains("OP-20"));

    // the row before the failure is committed, the row after is not
    assert!(repos.operations.find_by_code("OP-10").unwrap().is_some());
    assert!(repos.operations.find_by_code("OP-30").unwrap().is_none());
}

#[test]
fn test_unknown_machine_reference_fails_import() {
    let repos = test_repos();
    let importer = repos.importer();
    importer
        .import(EntityKind::WorkOrders, test_helpers::WORK_ORDER_CSV)
        .unwrap();

    let result = importer.import(
        EntityKind::Operations,
        "code,order_number,machine_code\nOP-10,WO-100,M-404\n",
    );
    match result {
        Err(ImportError::ReferenceNotFound { entity, key, .. }) => {
            assert_eq!(entity, "machine");
            assert_eq!(key, "M-404");
        }
        other => panic!("expected ReferenceNotFound, got {:?}", other),
    }
}

#[test]
fn test_activity_import_with_id_updates_existing_record() {
    let repos = test_repos();
    let importer = repos.importer();
    seed_via_import(&repos);

    let existing = repos.activities.list().unwrap();
    let target = existing
        .iter()
        .find(|r| r.status == "running")
        .expect("seeded running record");

    let csv = format!(
        "id,start_time,end_time,personnel_number,operation_code,quantity_good,quantity_reject,status,comment\n\
         {},2026-02-04T06:00:00,2026-02-04T14:00:00,1001,OP-20,45,1,completed,\n",
        target.id
    );
    let summary = importer.import(EntityKind::ActivityRecords, &csv).unwrap();
    assert_eq!(summary, ImportSummary { inserted: 0, updated: 1 });

    let updated = repos.activities.find_by_id(target.id).unwrap().unwrap();
    assert_eq!(updated.status, "completed");
    assert_eq!(updated.quantity_good, 45);
    assert!(updated.end_time.is_some());
    // the emptied comment cell clears the stored comment
    assert_eq!(updated.comment, None);
}

#[test]
fn test_activity_import_with_unknown_id_fails() {
    let repos = test_repos();
    let importer = repos.importer();
    seed_via_import(&repos);

    let result = importer.import(
        EntityKind::ActivityRecords,
        "id,start_time,personnel_number,operation_code\n\
         9999,2026-02-04T06:00:00,1000,OP-10\n",
    );
    assert!(matches!(
        result,
        Err(ImportError::RecordNotFound { id: 9999, .. })
    ));
}

#[test]
fn test_boolean_token_table_via_import() {
    let repos = test_repos();
    let importer = repos.importer();

    let csv = "code,name,active\n\
               M-01,A,true\n\
               M-02,B,1\n\
               M-03,C,YES\n\
               M-04,D,ja\n\
               M-05,E,Y\n\
               M-06,F,\n\
               M-07,G,false\n\
               M-08,H,nein\n";
    importer.import(EntityKind::Machines, csv).unwrap();

    let expect_true = ["M-01", "M-02", "M-03", "M-04", "M-05", "M-06"];
    for code in expect_true {
        let machine = repos.machines.find_by_code(code).unwrap().unwrap();
        assert!(machine.active, "{} should be active", code);
    }
    for code in ["M-07", "M-08"] {
        let machine = repos.machines.find_by_code(code).unwrap().unwrap();
        assert!(!machine.active, "{} should be inactive", code);
    }
}

#[test]
fn test_malformed_numeric_literal_aborts_file() {
    let repos = test_repos();
    let importer = repos.importer();

    let result = importer.import(
        EntityKind::WorkOrders,
        "order_number,quantity\nWO-100,zweihundert\n",
    );
    assert!(matches!(
        result,
        Err(ImportError::TypeConversionError { row: 2, field: "quantity", .. })
    ));
    assert_eq!(repos.count("work_orders"), 0);
}

#[test]
fn test_malformed_timestamp_aborts_file() {
    let repos = test_repos();
    let importer = repos.importer();
    seed_via_import(&repos);

    let result = importer.import(
        EntityKind::ActivityRecords,
        "start_time,personnel_number,operation_code\n03.02.2026,1000,OP-10\n",
    );
    assert!(matches!(
        result,
        Err(ImportError::TypeConversionError { field: "start_time", .. })
    ));
}

#[test]
fn test_import_accepts_byte_order_marker() {
    let repos = test_repos();
    let importer = repos.importer();

    let csv = "\u{feff}code,name\nM-01,Drehbank\n";
    let summary = importer.import(EntityKind::Machines, csv).unwrap();
    assert_eq!(summary.inserted, 1);
    assert!(repos.machines.find_by_code("M-01").unwrap().is_some());
}
