//! Tenure calculation.
//!
//! Tenure is counted from the hire date up to a point that lags today by a
//! fixed number of months (18 by default). The lag is part of the raise
//! policy: recent service does not yet count toward eligibility.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;

/// Average days per year used to convert days of service to years.
pub fn days_per_year() -> Decimal {
    Decimal::new(36525, 2)
}

/// Returns `today` shifted back by whole calendar months.
///
/// Month ends are clamped, so 31 August minus 18 months is 28 February (or
/// 29 in a leap year).
pub fn months_before(today: NaiveDate, months: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(months))
        .unwrap_or(NaiveDate::MIN)
}

/// Returns lagged tenure in years, rounded to one decimal place.
///
/// Returns `None` when the hire date is unknown. Tenure is negative for
/// employees hired within the lag window.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::tenure_years;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let hired = NaiveDate::from_ymd_opt(2020, 1, 1);
/// let today = NaiveDate::from_ymd_opt(2026, 7, 1).unwrap();
/// assert_eq!(tenure_years(hired, today, 18), Some(Decimal::new(50, 1)));
/// ```
pub fn tenure_years(hire_date: Option<NaiveDate>, today: NaiveDate, lag_months: u32) -> Option<Decimal> {
    let hire_date = hire_date?;
    let days = (months_before(today, lag_months) - hire_date).num_days();
    Some((Decimal::from(days) / days_per_year()).round_dp(1))
}
