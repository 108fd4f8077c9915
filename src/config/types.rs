//! Configuration types for the payroll engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from the YAML configuration file. Every field has a
//! default, so an empty file is a valid configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Default budget ceiling for raises, in currency units.
pub const DEFAULT_BUDGET: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// File names of the seven source tables and their field delimiter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceFiles {
    /// Staff positions.
    pub positions: String,
    /// Tariff rates and allowances.
    pub salaries: String,
    /// Org units, block codes and hire dates.
    pub org_units: String,
    /// Project cost allocation.
    pub projects: String,
    /// Bonus percentages.
    pub bonuses: String,
    /// Insurance contribution rates.
    pub insurance: String,
    /// Market benchmark compensation.
    pub market: String,
    /// Field delimiter.
    pub delimiter: char,
}

impl Default for SourceFiles {
    fn default() -> Self {
        Self {
            positions: "Должности.csv".to_string(),
            salaries: "Оклады и надбавки.csv".to_string(),
            org_units: "Подразделения, коды блоков, дата приема.csv".to_string(),
            projects: "Проекты.csv".to_string(),
            bonuses: "Проценты премирования.csv".to_string(),
            insurance: "Страховые взносы.csv".to_string(),
            market: "ФОТ по рынку.csv".to_string(),
            delimiter: '\t',
        }
    }
}

impl SourceFiles {
    /// Returns the delimiter as a byte, or `None` unless it is ASCII.
    pub fn delimiter_byte(&self) -> Option<u8> {
        self.delimiter.is_ascii().then_some(self.delimiter as u8)
    }
}

/// How a missing last-raise date is treated by the cooldown criterion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NeverRaisedPolicy {
    /// An employee with no recorded raise fails the cooldown criterion.
    #[default]
    Ineligible,
    /// An employee with no recorded raise passes the cooldown criterion.
    Eligible,
}

/// Thresholds of the raise recommendation rule.
///
/// An employee is recommended for a raise when all of these hold:
/// paid ratio below `paid_ratio_threshold`, last raise at least
/// `raise_cooldown_months` ago, tenure above `min_tenure_years`, and
/// headcount units above `min_headcount_units`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RaisePolicy {
    /// Paid ratio below which an employee counts as underpaid.
    pub paid_ratio_threshold: Decimal,
    /// Months that must have passed since the last raise.
    pub raise_cooldown_months: u32,
    /// Months subtracted from today before tenure is counted.
    pub tenure_lag_months: u32,
    /// Tenure in years that must be exceeded.
    pub min_tenure_years: Decimal,
    /// Headcount units that must be exceeded.
    pub min_headcount_units: Decimal,
    /// Raise size as a percent of the tariff rate.
    pub raise_percent: Decimal,
    /// Treatment of a missing last-raise date.
    pub never_raised: NeverRaisedPolicy,
}

impl Default for RaisePolicy {
    fn default() -> Self {
        Self {
            paid_ratio_threshold: Decimal::new(8, 1),
            raise_cooldown_months: 24,
            tenure_lag_months: 18,
            min_tenure_years: Decimal::ONE,
            min_headcount_units: Decimal::new(5, 1),
            raise_percent: Decimal::from(30),
            never_raised: NeverRaisedPolicy::Ineligible,
        }
    }
}

/// The complete payroll configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayrollConfig {
    /// Source file names.
    pub sources: SourceFiles,
    /// Declared pay-component columns of the salary table.
    ///
    /// When absent, the components are discovered from the salary table
    /// headers.
    pub pay_components: Option<Vec<String>>,
    /// Default budget ceiling.
    pub budget: Decimal,
    /// Raise recommendation thresholds.
    pub policy: RaisePolicy,
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self {
            sources: SourceFiles::default(),
            pay_components: None,
            budget: DEFAULT_BUDGET,
            policy: RaisePolicy::default(),
        }
    }
}
