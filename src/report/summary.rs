//! Budget summary and the recommended-raise list.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AllocatedEmployee, AllocationOutcome};

/// Headline figures of one allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// Employees in the reconciled table.
    pub total_employees: usize,
    /// Employees recommended for a raise.
    pub recommended_count: usize,
    /// Sum of allocated raises.
    pub total_raise: Decimal,
    /// Budget left unspent.
    pub leftover: Decimal,
    /// Factor applied to every desired raise.
    pub scale: Decimal,
}

impl BudgetSummary {
    /// Summarizes an allocation outcome.
    pub fn from_outcome(outcome: &AllocationOutcome) -> Self {
        Self {
            total_employees: outcome.employees.len(),
            recommended_count: outcome
                .employees
                .iter()
                .filter(|e| e.employee.metrics.raise_recommended)
                .count(),
            total_raise: outcome.total_allocated,
            leftover: outcome.leftover,
            scale: outcome.scale,
        }
    }
}

/// One row of the recommended-raise list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedEmployee {
    /// Personnel number.
    pub personnel_number: Option<String>,
    /// Full name.
    pub full_name: Option<String>,
    /// Position title.
    pub position_title: Option<String>,
    /// Total pay.
    pub total_pay: Option<Decimal>,
    /// Market benchmark pay.
    pub market_pay: Option<Decimal>,
    /// Total pay over market pay.
    pub paid_ratio: Option<Decimal>,
    /// Raise granted after scaling.
    pub allocated_raise: Decimal,
    /// Macro-region.
    pub mrf: Option<String>,
    /// Grade.
    pub grade: Option<String>,
}

impl From<&AllocatedEmployee> for RecommendedEmployee {
    fn from(allocated: &AllocatedEmployee) -> Self {
        let record = &allocated.employee.record;
        let metrics = &allocated.employee.metrics;
        Self {
            personnel_number: record.personnel_number.clone(),
            full_name: record.full_name.clone(),
            position_title: record.position_title.clone(),
            total_pay: metrics.total_pay,
            market_pay: metrics.market_pay,
            paid_ratio: metrics.paid_ratio,
            allocated_raise: allocated.allocated_raise,
            mrf: record.mrf.clone(),
            grade: record.grade.clone(),
        }
    }
}

/// Returns the `n` recommended employees with the largest allocated raise.
///
/// Employees with equal raises keep their reconciled order.
pub fn top_recommended(outcome: &AllocationOutcome, n: usize) -> Vec<RecommendedEmployee> {
    let mut recommended: Vec<&AllocatedEmployee> = outcome
        .employees
        .iter()
        .filter(|e| e.employee.metrics.raise_recommended)
        .collect();
    recommended.sort_by(|a, b| b.allocated_raise.cmp(&a.allocated_raise));

    recommended
        .into_iter()
        .take(n)
        .map(RecommendedEmployee::from)
        .collect()
}
