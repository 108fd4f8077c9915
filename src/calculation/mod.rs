//! Calculation logic for the payroll engine.
//!
//! This module contains the three stages of a run and the rules they are
//! built from: cell coercion, source reconciliation, the bonus multiplier,
//! table-wide percent normalization, lagged tenure, raise eligibility, the
//! metric engine and budget-capped allocation.

mod bonus_multiplier;
mod budget_allocation;
mod coercion;
mod metric_engine;
mod percent_normalization;
mod raise_eligibility;
mod reconciliation;
mod tenure;

pub use bonus_multiplier::{MONTHLY_BONUS_MONTHS, QUARTERLY_BONUS_MONTHS, bonus_multiplier};
pub use budget_allocation::{Budget, allocate, scale_factor};
pub use coercion::{ISO_DATE_FORMAT, parse_day_first_date, parse_decimal, parse_iso_date};
pub use metric_engine::{calculate_metrics, derive_metrics, score_employees};
pub use percent_normalization::{NormalizedColumn, normalize_percent_column};
pub use raise_eligibility::{
    EligibilityInput, EligibilityResult, assess_raise_eligibility, desired_raise,
    raise_cooldown_elapsed,
};
pub use reconciliation::{
    EMPLOYEE_TABLE, Reconciliation, ReconciliationReport, deduplicate, left_join, natural_join,
    reconcile, split_vacancies,
};
pub use tenure::{days_per_year, months_before, tenure_years};
