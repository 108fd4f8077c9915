//! Bonus multiplier calculation.
//!
//! Monthly and quarterly bonuses are weighted by the share of the year they
//! are not already reflected in the base comparison window; the annual bonus
//! counts in full.

use rust_decimal::Decimal;

/// Months of the year a monthly bonus is counted for.
pub const MONTHLY_BONUS_MONTHS: u32 = 11;

/// Months of the year a quarterly bonus is counted for.
pub const QUARTERLY_BONUS_MONTHS: u32 = 9;

const MONTHS_PER_YEAR: u32 = 12;

/// Returns `1 + (monthly * 11/12 + quarterly * 9/12 + annual) / 100`.
///
/// Percentages are whole numbers, so `10` means 10%. Returns `None` when the
/// percentages are too large to combine.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::bonus_multiplier;
/// use rust_decimal::Decimal;
///
/// let multiplier = bonus_multiplier(Decimal::from(12), Decimal::ZERO, Decimal::from(4));
/// assert_eq!(multiplier, Some(Decimal::new(115, 2)));
/// ```
pub fn bonus_multiplier(
    monthly_pct: Decimal,
    quarterly_pct: Decimal,
    annual_pct: Decimal,
) -> Option<Decimal> {
    let months = Decimal::from(MONTHS_PER_YEAR);
    let monthly = monthly_pct.checked_mul(Decimal::from(MONTHLY_BONUS_MONTHS))? / months;
    let quarterly = quarterly_pct.checked_mul(Decimal::from(QUARTERLY_BONUS_MONTHS))? / months;
    let weighted = monthly.checked_add(quarterly)?.checked_add(annual_pct)?;

    Decimal::ONE.checked_add(weighted / Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    #[test]
    fn test_no_bonuses_gives_one() {
        assert_eq!(bonus_multiplier(dec(0), dec(0), dec(0)), Some(Decimal::ONE));
    }

    #[test]
    fn test_monthly_weighted_by_eleven_twelfths() {
        // 24% * 11/12 = 22%
        assert_eq!(bonus_multiplier(dec(24), dec(0), dec(0)), Some(Decimal::new(122, 2)));
    }

    #[test]
    fn test_quarterly_weighted_by_nine_twelfths() {
        // 20% * 9/12 = 15%
        assert_eq!(bonus_multiplier(dec(0), dec(20), dec(0)), Some(Decimal::new(115, 2)));
    }

    #[test]
    fn test_annual_counts_in_full() {
        assert_eq!(bonus_multiplier(dec(0), dec(0), dec(25)), Some(Decimal::new(125, 2)));
    }

    #[test]
    fn test_all_components_combined() {
        // 12*11/12 + 8*9/12 + 10 = 11 + 6 + 10 = 27
        assert_eq!(bonus_multiplier(dec(12), dec(8), dec(10)), Some(Decimal::new(127, 2)));
    }

    #[test]
    fn test_oversized_percentages_give_none() {
        let huge = Decimal::from_scientific("7e28").unwrap();
        assert_eq!(bonus_multiplier(huge, dec(0), dec(0)), None);
        assert_eq!(bonus_multiplier(dec(0), huge, dec(0)), None);
    }
}
