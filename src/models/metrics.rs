//! Derived compensation metrics and allocation results.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::employee::EmployeeRecord;

/// A value split by cost allocation category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSplit {
    /// Operating expenditure share.
    pub opex: Option<Decimal>,
    /// Capital expenditure share.
    pub capex: Option<Decimal>,
    /// O2O share.
    pub o2o: Option<Decimal>,
}

/// A single step in the audit trace recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// Every field the metric engine derives for one employee.
///
/// `None` means the value could not be derived because an input was missing
/// or unparseable; it is never an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeMetrics {
    /// Headcount units, zero when missing.
    pub headcount_units: Decimal,
    /// Base tariff rate.
    pub tariff_rate: Option<Decimal>,
    /// Pay components in declared order.
    pub pay_components: Vec<Option<Decimal>>,
    /// Date of the last raise.
    pub last_raise_date: Option<NaiveDate>,
    /// Hire date.
    pub hire_date: Option<NaiveDate>,
    /// Monthly bonus percent, zero when missing.
    pub monthly_bonus_pct: Decimal,
    /// Quarterly bonus percent, zero when missing.
    pub quarterly_bonus_pct: Decimal,
    /// Annual bonus percent, zero when missing.
    pub annual_bonus_pct: Decimal,
    /// `1 + (monthly * 11/12 + quarterly * 9/12 + annual) / 100`; `None` on
    /// overflow.
    pub bonus_multiplier: Option<Decimal>,
    /// Sum of pay components, nulls counted as zero; `None` on overflow.
    pub total_allowances: Option<Decimal>,
    /// Tariff rate plus allowances.
    pub base_pay: Option<Decimal>,
    /// Base pay times bonus multiplier.
    pub total_pay: Option<Decimal>,
    /// Allocation ratios as fractions.
    pub cost_ratios: CostSplit,
    /// Total pay split by allocation ratio.
    pub total_pay_split: CostSplit,
    /// Insurance contribution rate as a fraction, zero when missing.
    pub insurance_rate: Decimal,
    /// Total pay including social contributions.
    pub total_pay_with_contributions: Option<Decimal>,
    /// Tenure in years, lagged and rounded to one decimal.
    pub tenure_years: Option<Decimal>,
    /// Market benchmark, `None` when unknown or zero.
    pub market_pay: Option<Decimal>,
    /// Total pay over market pay.
    pub paid_ratio: Option<Decimal>,
    /// Whether the employee qualifies for a raise.
    pub raise_recommended: bool,
    /// Uncapped raise, set only when recommended.
    pub desired_raise: Option<Decimal>,
    /// Total pay plus the uncapped raise.
    pub projected_pay_uncapped: Option<Decimal>,
}

/// An employee with derived metrics and the eligibility audit step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoredEmployee {
    /// The reconciled source record.
    pub record: EmployeeRecord,
    /// Derived metrics.
    pub metrics: EmployeeMetrics,
    /// Why the raise was or was not recommended.
    pub eligibility: AuditStep,
}

/// An employee after budget allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocatedEmployee {
    /// The scored employee.
    #[serde(flatten)]
    pub employee: ScoredEmployee,
    /// Raise granted after proportional scaling; zero when none desired.
    pub allocated_raise: Decimal,
    /// Total pay plus the allocated raise.
    pub projected_pay_capped: Option<Decimal>,
}

/// The result of allocating a budget across all desired raises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AllocationOutcome {
    /// Employees in reconciled order.
    pub employees: Vec<AllocatedEmployee>,
    /// The budget ceiling.
    pub budget: Decimal,
    /// Sum of desired raises.
    pub total_desired: Decimal,
    /// Factor applied to every desired raise, never above one.
    pub scale: Decimal,
    /// Sum of allocated raises.
    pub total_allocated: Decimal,
    /// Budget left unspent.
    pub leftover: Decimal,
}
