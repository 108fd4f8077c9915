//! Single-employee view, looked up by personnel number.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AllocatedEmployee, AllocationOutcome};

/// The compensation position of one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeView {
    /// Personnel number.
    pub personnel_number: String,
    /// Full name.
    pub full_name: Option<String>,
    /// Position title.
    pub position_title: Option<String>,
    /// Grade.
    pub grade: Option<String>,
    /// Total pay.
    pub total_pay: Option<Decimal>,
    /// Market benchmark pay.
    pub market_pay: Option<Decimal>,
    /// Total pay over market pay.
    pub paid_ratio: Option<Decimal>,
}

impl EmployeeView {
    fn new(personnel_number: &str, allocated: &AllocatedEmployee) -> Self {
        let record = &allocated.employee.record;
        let metrics = &allocated.employee.metrics;
        Self {
            personnel_number: personnel_number.to_string(),
            full_name: record.full_name.clone(),
            position_title: record.position_title.clone(),
            grade: record.grade.clone(),
            total_pay: metrics.total_pay,
            market_pay: metrics.market_pay,
            paid_ratio: metrics.paid_ratio,
        }
    }
}

/// Finds the first employee with the given personnel number.
///
/// Surrounding whitespace is ignored on both sides.
pub fn find_by_personnel_number(
    outcome: &AllocationOutcome,
    personnel_number: &str,
) -> Option<EmployeeView> {
    let wanted = personnel_number.trim();
    outcome
        .employees
        .iter()
        .find(|e| {
            e.employee
                .record
                .personnel_number
                .as_deref()
                .is_some_and(|number| number.trim() == wanted)
        })
        .map(|e| EmployeeView::new(wanted, e))
}
