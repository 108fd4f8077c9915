//! Raise eligibility rule.
//!
//! An employee is recommended for a raise when every criterion holds:
//!
//! - paid below the market threshold (paid ratio < 0.8),
//! - last raise on or before the cooldown cutoff (24 months ago),
//! - lagged tenure above one year,
//! - more than half a headcount unit.
//!
//! An unknown paid ratio or tenure fails its criterion. An unknown last-raise
//! date is decided by [`NeverRaisedPolicy`].

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::config::{NeverRaisedPolicy, RaisePolicy};
use crate::models::AuditStep;

use super::tenure::months_before;

/// Inputs of the eligibility rule for one employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EligibilityInput {
    /// Total pay over market pay.
    pub paid_ratio: Option<Decimal>,
    /// Date of the last raise.
    pub last_raise_date: Option<NaiveDate>,
    /// Lagged tenure in years.
    pub tenure_years: Option<Decimal>,
    /// Headcount units.
    pub headcount_units: Decimal,
}

/// The result of the eligibility rule, including the audit step.
#[derive(Debug, Clone)]
pub struct EligibilityResult {
    /// Whether a raise is recommended.
    pub recommended: bool,
    /// The audit step recording this decision.
    pub audit_step: AuditStep,
}

/// Returns true if the last raise is old enough.
///
/// A missing date is resolved explicitly by the policy rather than by any
/// null-comparison convention.
pub fn raise_cooldown_elapsed(
    last_raise_date: Option<NaiveDate>,
    today: NaiveDate,
    policy: &RaisePolicy,
) -> bool {
    match last_raise_date {
        Some(date) => date <= months_before(today, policy.raise_cooldown_months),
        None => match policy.never_raised {
            NeverRaisedPolicy::Eligible => true,
            NeverRaisedPolicy::Ineligible => false,
        },
    }
}

/// Applies the eligibility rule.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{EligibilityInput, assess_raise_eligibility};
/// use payroll_engine::config::RaisePolicy;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let input = EligibilityInput {
///     paid_ratio: Some(Decimal::new(6, 1)),
///     last_raise_date: NaiveDate::from_ymd_opt(2020, 1, 1),
///     tenure_years: Some(Decimal::from(3)),
///     headcount_units: Decimal::ONE,
/// };
/// let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
///
/// let result = assess_raise_eligibility(&input, today, &RaisePolicy::default());
/// assert!(result.recommended);
/// assert_eq!(result.audit_step.rule_id, "raise_eligibility");
/// ```
pub fn assess_raise_eligibility(
    input: &EligibilityInput,
    today: NaiveDate,
    policy: &RaisePolicy,
) -> EligibilityResult {
    let cutoff = months_before(today, policy.raise_cooldown_months);

    let underpaid = input
        .paid_ratio
        .is_some_and(|ratio| ratio < policy.paid_ratio_threshold);
    let cooldown_elapsed = raise_cooldown_elapsed(input.last_raise_date, today, policy);
    let tenured = input
        .tenure_years
        .is_some_and(|tenure| tenure > policy.min_tenure_years);
    let staffed = input.headcount_units > policy.min_headcount_units;

    let recommended = underpaid && cooldown_elapsed && tenured && staffed;

    let mut failed = Vec::new();
    if !underpaid {
        failed.push("paid ratio not below threshold");
    }
    if !cooldown_elapsed {
        failed.push("last raise too recent or unknown");
    }
    if !tenured {
        failed.push("tenure too short or unknown");
    }
    if !staffed {
        failed.push("headcount units too low");
    }

    let reasoning = if recommended {
        "All raise criteria met".to_string()
    } else {
        format!("Raise not recommended: {}", failed.join(", "))
    };

    let audit_step = AuditStep {
        rule_id: "raise_eligibility".to_string(),
        rule_name: "Raise Eligibility".to_string(),
        input: serde_json::json!({
            "paid_ratio": input.paid_ratio.map(|r| r.to_string()),
            "last_raise_date": input.last_raise_date.map(|d| d.to_string()),
            "tenure_years": input.tenure_years.map(|t| t.to_string()),
            "headcount_units": input.headcount_units.to_string(),
            "raise_cutoff": cutoff.to_string()
        }),
        output: serde_json::json!({
            "underpaid": underpaid,
            "cooldown_elapsed": cooldown_elapsed,
            "tenured": tenured,
            "staffed": staffed,
            "recommended": recommended
        }),
        reasoning,
    };

    EligibilityResult {
        recommended,
        audit_step,
    }
}

/// Returns the uncapped raise for a recommended employee.
///
/// The raise is `raise_percent` of the tariff rate. Returns `None` when no
/// raise is recommended or the tariff rate is unknown.
pub fn desired_raise(
    recommended: bool,
    tariff_rate: Option<Decimal>,
    policy: &RaisePolicy,
) -> Option<Decimal> {
    if !recommended {
        return None;
    }
    (tariff_rate? / Decimal::ONE_HUNDRED).checked_mul(policy.raise_percent)
}
