//! Request types for the payroll engine API.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for the `/allocate` endpoint.
///
/// Every field is optional: the budget defaults to the configured ceiling,
/// the date to today and the list length to the dashboard size.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Budget ceiling for all raises.
    #[serde(default)]
    pub budget: Option<Decimal>,
    /// Date used for tenure and raise cooldown.
    #[serde(default)]
    pub current_date: Option<NaiveDate>,
    /// Number of recommended employees to return.
    #[serde(default)]
    pub top: Option<usize>,
}

/// Query parameters of the `/employees/:personnel_number` endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeQuery {
    /// Date used for tenure and raise cooldown.
    #[serde(default)]
    pub current_date: Option<NaiveDate>,
}
