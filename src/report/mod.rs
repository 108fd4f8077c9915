//! Aggregate views over an allocation outcome.
//!
//! These are the read models behind the budget dashboard, the per-employee
//! view and the chart data written next to the enriched tables.

mod employee_view;
mod grouping;
mod summary;

pub use employee_view::{EmployeeView, find_by_personnel_number};
pub use grouping::{GroupBy, GroupTotal, raise_by_group};
pub use summary::{BudgetSummary, RecommendedEmployee, top_recommended};

/// Number of recommended employees shown on the budget dashboard.
pub const DASHBOARD_TOP_RECOMMENDED: usize = 20;

/// Number of groups shown per breakdown on the budget dashboard.
pub const DASHBOARD_TOP_GROUPS: usize = 10;
