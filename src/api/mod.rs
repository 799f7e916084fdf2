// ==========================================
// IWS BDE Plattform - API layer
// ==========================================
// Business interfaces consumed by the HTTP surface
// ==========================================

pub mod activity_api;
pub mod employee_api;
pub mod error;
pub mod machine_api;
pub mod operation_api;
pub mod transfer_api;
pub mod work_order_api;

pub use activity_api::ActivityApi;
pub use employee_api::EmployeeApi;
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use machine_api::MachineApi;
pub use operation_api::OperationApi;
pub use transfer_api::TransferApi;
pub use work_order_api::WorkOrderApi;
