//! HTTP API module for the payroll engine.
//!
//! This module provides the REST API endpoints for running budget
//! allocations and looking up individual employees.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AllocationRequest, EmployeeQuery};
pub use response::{AllocationResponse, ApiError, ApiErrorResponse};
pub use state::AppState;
