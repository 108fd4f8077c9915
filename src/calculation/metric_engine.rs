//! Metric engine.
//!
//! Derives every compensation metric for the reconciled employees. The engine
//! is a pure function of the table, the declared pay components, the policy
//! and the injected current date: it reads no clock and performs no I/O.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::RaisePolicy;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, CostSplit, EmployeeMetrics, EmployeeRecord, RawTable, ScoredEmployee,
};

use super::bonus_multiplier::bonus_multiplier;
use super::coercion::{parse_day_first_date, parse_decimal, parse_iso_date};
use super::percent_normalization::normalize_percent_column;
use super::raise_eligibility::{EligibilityInput, assess_raise_eligibility, desired_raise};
use super::tenure::tenure_years;

/// Table-wide normalized ratios, one entry per record.
struct NormalizedRatios {
    opex: Vec<Option<Decimal>>,
    capex: Vec<Option<Decimal>>,
    o2o: Vec<Option<Decimal>>,
    insurance: Vec<Option<Decimal>>,
}

impl NormalizedRatios {
    fn from_records(records: &[EmployeeRecord]) -> Self {
        Self {
            opex: normalized_column(records, "OPEX", |r| r.opex_ratio.as_deref()),
            capex: normalized_column(records, "CAPEX", |r| r.capex_ratio.as_deref()),
            o2o: normalized_column(records, "O2O", |r| r.o2o_ratio.as_deref()),
            insurance: normalized_column(records, "insurance", |r| r.insurance_rate.as_deref()),
        }
    }
}

fn normalized_column(
    records: &[EmployeeRecord],
    name: &str,
    field: fn(&EmployeeRecord) -> Option<&str>,
) -> Vec<Option<Decimal>> {
    let raw: Vec<Option<Decimal>> = records.iter().map(|r| parse_decimal(field(r))).collect();
    let normalized = normalize_percent_column(&raw);
    if normalized.rescaled {
        debug!(column = name, "Ratio column read as whole percentages");
    }
    normalized.values
}

/// Derives the metrics of one employee.
///
/// `ratios` and `insurance_rate` must already be normalized to fractions
/// across the whole table. A value that overflows `Decimal` is left null along
/// with everything derived from it.
pub fn derive_metrics(
    record: &EmployeeRecord,
    ratios: CostSplit,
    insurance_rate: Option<Decimal>,
    today: NaiveDate,
    policy: &RaisePolicy,
) -> (EmployeeMetrics, AuditStep) {
    let headcount_units = parse_decimal(record.headcount_units.as_deref()).unwrap_or_default();
    let tariff_rate = parse_decimal(record.tariff_rate.as_deref());
    let pay_components: Vec<Option<Decimal>> = record
        .pay_components
        .iter()
        .map(|c| parse_decimal(c.as_deref()))
        .collect();

    let last_raise_date = parse_iso_date(record.last_raise_date.as_deref());
    let hire_date = parse_day_first_date(record.hire_date.as_deref());

    let monthly_bonus_pct = parse_decimal(record.monthly_bonus_pct.as_deref()).unwrap_or_default();
    let quarterly_bonus_pct = parse_decimal(record.quarterly_bonus_pct.as_deref()).unwrap_or_default();
    let annual_bonus_pct = parse_decimal(record.annual_bonus_pct.as_deref()).unwrap_or_default();
    let bonus_multiplier = bonus_multiplier(monthly_bonus_pct, quarterly_bonus_pct, annual_bonus_pct);

    let total_allowances = pay_components
        .iter()
        .flatten()
        .try_fold(Decimal::ZERO, |sum, component| sum.checked_add(*component));
    let base_pay = tariff_rate.and_then(|rate| rate.checked_add(total_allowances?));
    let total_pay = base_pay.and_then(|base| base.checked_mul(bonus_multiplier?));

    let split = |ratio: Option<Decimal>| total_pay?.checked_mul(ratio?);
    let total_pay_split = CostSplit {
        opex: split(ratios.opex),
        capex: split(ratios.capex),
        o2o: split(ratios.o2o),
    };

    let insurance_rate = insurance_rate.unwrap_or_default();
    let total_pay_with_contributions = total_pay
        .and_then(|pay| pay.checked_mul(Decimal::ONE.checked_add(insurance_rate)?));

    let tenure_years = tenure_years(hire_date, today, policy.tenure_lag_months);

    let market_pay = parse_decimal(record.market_pay.as_deref()).filter(|pay| !pay.is_zero());
    let paid_ratio = match (total_pay, market_pay) {
        (Some(pay), Some(market)) => pay.checked_div(market),
        _ => None,
    };

    let eligibility = assess_raise_eligibility(
        &EligibilityInput {
            paid_ratio,
            last_raise_date,
            tenure_years,
            headcount_units,
        },
        today,
        policy,
    );
    let desired_raise = desired_raise(eligibility.recommended, tariff_rate, policy);
    let projected_pay_uncapped =
        total_pay.and_then(|pay| pay.checked_add(desired_raise.unwrap_or_default()));

    let metrics = EmployeeMetrics {
        headcount_units,
        tariff_rate,
        pay_components,
        last_raise_date,
        hire_date,
        monthly_bonus_pct,
        quarterly_bonus_pct,
        annual_bonus_pct,
        bonus_multiplier,
        total_allowances,
        base_pay,
        total_pay,
        cost_ratios: ratios,
        total_pay_split,
        insurance_rate,
        total_pay_with_contributions,
        tenure_years,
        market_pay,
        paid_ratio,
        raise_recommended: eligibility.recommended,
        desired_raise,
        projected_pay_uncapped,
    };

    (metrics, eligibility.audit_step)
}

/// Scores already extracted employee records.
pub fn score_employees(
    records: Vec<EmployeeRecord>,
    today: NaiveDate,
    policy: &RaisePolicy,
) -> Vec<ScoredEmployee> {
    let ratios = NormalizedRatios::from_records(&records);

    records
        .into_iter()
        .enumerate()
        .map(|(i, record)| {
            let cost_ratios = CostSplit {
                opex: ratios.opex[i],
                capex: ratios.capex[i],
                o2o: ratios.o2o[i],
            };
            let (metrics, eligibility) =
                derive_metrics(&record, cost_ratios, ratios.insurance[i], today, policy);
            ScoredEmployee {
                record,
                metrics,
                eligibility,
            }
        })
        .collect()
}

/// Derives metrics for every row of the reconciled employee table.
///
/// # Errors
///
/// Returns `MissingColumn` if the table lacks a required column or one of the
/// declared pay components. Unparseable cells are never errors.
pub fn calculate_metrics(
    employees: &RawTable,
    pay_components: &[String],
    today: NaiveDate,
    policy: &RaisePolicy,
) -> EngineResult<Vec<ScoredEmployee>> {
    let records = EmployeeRecord::from_table(employees, pay_components)?;
    let scored = score_employees(records, today, policy);

    info!(
        employees = scored.len(),
        recommended = scored.iter().filter(|e| e.metrics.raise_recommended).count(),
        today = %today,
        "Metrics calculated"
    );

    Ok(scored)
}
