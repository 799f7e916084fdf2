// ==========================================
// IWS BDE Plattform - HTTP routes
// ==========================================
// JSON CRUD per entity kind plus the CSV exchange endpoints. Handlers
// stay thin; all behavior lives in the API layer.
// ==========================================

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::ApiError;
use crate::app::state::AppState;
use crate::domain::{
    ActivityRecord, ActivityRecordUpdate, Employee, EmployeeUpdate, Machine, MachineUpdate,
    NewActivityRecord, NewEmployee, NewMachine, NewOperation, NewWorkOrder, Operation,
    OperationUpdate, WorkOrder, WorkOrderUpdate,
};
use crate::importer::ImportSummary;

/// Build the full application router
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/employees", get(list_employees).post(create_employee))
        .route(
            "/employees/:id",
            get(get_employee).put(update_employee).delete(delete_employee),
        )
        .route("/machines", get(list_machines).post(create_machine))
        .route(
            "/machines/:id",
            get(get_machine).put(update_machine).delete(delete_machine),
        )
        .route("/work-orders", get(list_work_orders).post(create_work_order))
        .route(
            "/work-orders/:id",
            get(get_work_order)
                .put(update_work_order)
                .delete(delete_work_order),
        )
        .route("/operations", get(list_operations).post(create_operation))
        .route(
            "/operations/:id",
            get(get_operation)
                .put(update_operation)
                .delete(delete_operation),
        )
        .route(
            "/activity-records",
            get(list_activity_records).post(create_activity_record),
        )
        .route(
            "/activity-records/:id",
            get(get_activity_record)
                .put(update_activity_record)
                .delete(delete_activity_record),
        )
        .route("/csv/:entity", get(export_entity_csv).post(import_entity_csv))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

// ==========================================
// System endpoints
// ==========================================

async fn root() -> Json<serde_json::Value> {
    Json(json!({
        "name": crate::APP_NAME,
        "version": crate::VERSION,
        "csv_endpoints": "/csv/{entity}",
    }))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

// ==========================================
// Employee endpoints
// ==========================================

async fn list_employees(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Employee>>, ApiError> {
    Ok(Json(state.employee_api.list()?))
}

async fn create_employee(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewEmployee>,
) -> Result<(StatusCode, Json<Employee>), ApiError> {
    Ok((StatusCode::CREATED, Json(state.employee_api.create(payload)?)))
}

async fn get_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.employee_api.get(id)?))
}

async fn update_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(changes): Json<EmployeeUpdate>,
) -> Result<Json<Employee>, ApiError> {
    Ok(Json(state.employee_api.update(id, changes)?))
}

async fn delete_employee(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.employee_api.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==========================================
// Machine endpoints
// ==========================================

async fn list_machines(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Machine>>, ApiError> {
    Ok(Json(state.machine_api.list()?))
}

async fn create_machine(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewMachine>,
) -> Result<(StatusCode, Json<Machine>), ApiError> {
    Ok((StatusCode::CREATED, Json(state.machine_api.create(payload)?)))
}

async fn get_machine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Machine>, ApiError> {
    Ok(Json(state.machine_api.get(id)?))
}

async fn update_machine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(changes): Json<MachineUpdate>,
) -> Result<Json<Machine>, ApiError> {
    Ok(Json(state.machine_api.update(id, changes)?))
}

async fn delete_machine(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.machine_api.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==========================================
// Work order endpoints
// ==========================================

async fn list_work_orders(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<WorkOrder>>, ApiError> {
    Ok(Json(state.work_order_api.list()?))
}

async fn create_work_order(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewWorkOrder>,
) -> Result<(StatusCode, Json<WorkOrder>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.work_order_api.create(payload)?),
    ))
}

async fn get_work_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<WorkOrder>, ApiError> {
    Ok(Json(state.work_order_api.get(id)?))
}

async fn update_work_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(changes): Json<WorkOrderUpdate>,
) -> Result<Json<WorkOrder>, ApiError> {
    Ok(Json(state.work_order_api.update(id, changes)?))
}

async fn delete_work_order(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.work_order_api.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==========================================
// Operation endpoints
// ==========================================

async fn list_operations(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Operation>>, ApiError> {
    Ok(Json(state.operation_api.list()?))
}

async fn create_operation(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewOperation>,
) -> Result<(StatusCode, Json<Operation>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.operation_api.create(payload)?),
    ))
}

async fn get_operation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Operation>, ApiError> {
    Ok(Json(state.operation_api.get(id)?))
}

async fn update_operation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(changes): Json<OperationUpdate>,
) -> Result<Json<Operation>, ApiError> {
    Ok(Json(state.operation_api.update(id, changes)?))
}

async fn delete_operation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.operation_api.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==========================================
// Activity record endpoints
// ==========================================

async fn list_activity_records(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ActivityRecord>>, ApiError> {
    Ok(Json(state.activity_api.list()?))
}

async fn create_activity_record(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewActivityRecord>,
) -> Result<(StatusCode, Json<ActivityRecord>), ApiError> {
    Ok((
        StatusCode::CREATED,
        Json(state.activity_api.create(payload)?),
    ))
}

async fn get_activity_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<ActivityRecord>, ApiError> {
    Ok(Json(state.activity_api.get(id)?))
}

async fn update_activity_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(changes): Json<ActivityRecordUpdate>,
) -> Result<Json<ActivityRecord>, ApiError> {
    Ok(Json(state.activity_api.update(id, changes)?))
}

async fn delete_activity_record(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.activity_api.delete(id)?;
    Ok(StatusCode::NO_CONTENT)
}

// ==========================================
// CSV import/export
// ==========================================

async fn export_entity_csv(
    State(state): State<Arc<AppState>>,
    Path(entity): Path<String>,
) -> Result<Response, ApiError> {
    let document = state.transfer_api.export(&entity)?;
    let disposition = format!("attachment; filename={}.csv", entity);
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        document,
    )
        .into_response())
}

async fn import_entity_csv(
    State(state): State<Arc<AppState>>,
    Path(entity): Path<String>,
    body: String,
) -> Result<Json<ImportSummary>, ApiError> {
    Ok(Json(state.transfer_api.import(&entity, &body)?))
}
