//! Budget-constrained raise allocation.
//!
//! When the sum of desired raises fits the budget every raise is granted in
//! full. Otherwise every raise is scaled by the same factor so that the
//! allocated total equals the budget.

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::{AllocatedEmployee, AllocationOutcome, ScoredEmployee};

/// A validated, non-negative budget ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Budget(Decimal);

impl Budget {
    /// Validates a budget ceiling.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::calculation::Budget;
    /// use rust_decimal::Decimal;
    ///
    /// assert!(Budget::new(Decimal::from(15_000)).is_ok());
    /// assert!(Budget::new(Decimal::from(-1)).is_err());
    /// ```
    pub fn new(amount: Decimal) -> EngineResult<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(EngineError::InvalidBudget {
                message: format!("budget must not be negative, got {}", amount),
            });
        }
        Ok(Self(amount))
    }

    /// Validates a floating-point budget ceiling.
    ///
    /// NaN and infinite values are rejected along with negative ones.
    pub fn try_from_f64(amount: f64) -> EngineResult<Self> {
        if !amount.is_finite() {
            return Err(EngineError::InvalidBudget {
                message: format!("budget must be a finite number, got {}", amount),
            });
        }
        let amount = Decimal::try_from(amount).map_err(|e| EngineError::InvalidBudget {
            message: e.to_string(),
        })?;
        Self::new(amount)
    }

    /// Returns the budget amount.
    pub fn amount(&self) -> Decimal {
        self.0
    }
}

/// Returns the factor applied to every desired raise.
///
/// The factor is one when the desired total fits the budget (including a
/// desired total of zero), and `budget / total_desired` otherwise.
pub fn scale_factor(total_desired: Decimal, budget: Budget) -> Decimal {
    if total_desired <= Decimal::ZERO || total_desired <= budget.amount() {
        return Decimal::ONE;
    }
    budget.amount() / total_desired
}

/// Scale factor for desired raises whose sum does not fit in a `Decimal`.
///
/// Such a sum exceeds every budget, so the factor is `budget / sum`, computed
/// from the mean raise. A mean that cancels to zero allocates nothing.
fn overflowing_scale_factor(desired: &[Decimal], budget: Budget) -> Decimal {
    let count = Decimal::from(desired.len());
    let mean = desired
        .iter()
        .fold(Decimal::ZERO, |sum, raise| sum.saturating_add(*raise / count));
    (budget.amount() / count)
        .checked_div(mean)
        .unwrap_or(Decimal::ZERO)
}

/// Allocates the budget across all desired raises.
///
/// Employees without a desired raise are allocated zero. Leftover is the
/// unspent budget; when scaling applies it is zero up to decimal rounding
/// and never negative. A desired total beyond `Decimal::MAX` is reported as
/// `Decimal::MAX`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::{Budget, allocate};
/// use rust_decimal::Decimal;
///
/// let outcome = allocate(vec![], Budget::new(Decimal::from(10_000_000)).unwrap());
/// assert_eq!(outcome.scale, Decimal::ONE);
/// assert_eq!(outcome.leftover, Decimal::from(10_000_000));
/// ```
pub fn allocate(employees: Vec<ScoredEmployee>, budget: Budget) -> AllocationOutcome {
    let desired: Vec<Decimal> = employees
        .iter()
        .filter_map(|e| e.metrics.desired_raise)
        .collect();
    let (total_desired, scale) = match desired
        .iter()
        .try_fold(Decimal::ZERO, |sum, raise| sum.checked_add(*raise))
    {
        Some(total) => (total, scale_factor(total, budget)),
        None => (Decimal::MAX, overflowing_scale_factor(&desired, budget)),
    };

    let employees: Vec<AllocatedEmployee> = employees
        .into_iter()
        .map(|employee| {
            let allocated_raise = employee
                .metrics
                .desired_raise
                .unwrap_or_default()
                .saturating_mul(scale);
            let projected_pay_capped = employee
                .metrics
                .total_pay
                .and_then(|pay| pay.checked_add(allocated_raise));
            AllocatedEmployee {
                employee,
                allocated_raise,
                projected_pay_capped,
            }
        })
        .collect();

    let total_allocated = employees
        .iter()
        .map(|e| e.allocated_raise)
        .fold(Decimal::ZERO, Decimal::saturating_add);
    let leftover = budget
        .amount()
        .saturating_sub(total_allocated)
        .max(Decimal::ZERO);

    info!(
        budget = %budget.amount(),
        total_desired = %total_desired,
        scale = %scale,
        total_allocated = %total_allocated,
        leftover = %leftover,
        "Budget allocated"
    );

    AllocationOutcome {
        employees,
        budget: budget.amount(),
        total_desired,
        scale,
        total_allocated,
        leftover,
    }
}
