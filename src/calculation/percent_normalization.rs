//! Table-wide percent normalization.
//!
//! Ratio columns arrive either as fractions (`0.3`) or as whole percentages
//! (`30`). The units are decided once per column: if any value in the column
//! exceeds one, the whole column is read as percentages and divided by 100.
//! A column of genuine percentages that are all at most 1% is therefore read
//! as fractions.

use rust_decimal::Decimal;

/// A column after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedColumn {
    /// Values as fractions, nulls preserved.
    pub values: Vec<Option<Decimal>>,
    /// Whether the column was divided by 100.
    pub rescaled: bool,
}

/// Normalizes a column of ratios to fractions.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::normalize_percent_column;
/// use rust_decimal::Decimal;
///
/// let column = vec![Some(Decimal::new(2, 1)), None, Some(Decimal::new(15, 1))];
/// let normalized = normalize_percent_column(&column);
/// assert!(normalized.rescaled);
/// assert_eq!(normalized.values[0], Some(Decimal::new(2, 3)));
/// assert_eq!(normalized.values[1], None);
/// ```
pub fn normalize_percent_column(values: &[Option<Decimal>]) -> NormalizedColumn {
    let max = values.iter().flatten().max();
    let rescaled = max.is_some_and(|max| *max > Decimal::ONE);

    let values = if rescaled {
        values
            .iter()
            .map(|v| v.map(|v| v / Decimal::ONE_HUNDRED))
            .collect()
    } else {
        values.to_vec()
    };

    NormalizedColumn { values, rescaled }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_fractions_are_left_alone() {
        let column = vec![Some(dec("0.2")), Some(dec("1")), Some(dec("0.5"))];
        let normalized = normalize_percent_column(&column);
        assert!(!normalized.rescaled);
        assert_eq!(normalized.values, column);
    }

    #[test]
    fn test_single_outlier_rescales_whole_column() {
        let column = vec![Some(dec("0.2")), Some(dec("0.5")), Some(dec("1.5"))];
        let normalized = normalize_percent_column(&column);
        assert!(normalized.rescaled);
        assert_eq!(
            normalized.values,
            vec![Some(dec("0.002")), Some(dec("0.005")), Some(dec("0.015"))]
        );
    }

    #[test]
    fn test_whole_percentages() {
        let column = vec![Some(dec("60")), Some(dec("40"))];
        let normalized = normalize_percent_column(&column);
        assert_eq!(normalized.values, vec![Some(dec("0.6")), Some(dec("0.4"))]);
    }

    #[test]
    fn test_all_null_column() {
        let column = vec![None, None];
        let normalized = normalize_percent_column(&column);
        assert!(!normalized.rescaled);
        assert_eq!(normalized.values, column);
    }

    #[test]
    fn test_empty_column() {
        let normalized = normalize_percent_column(&[]);
        assert!(!normalized.rescaled);
        assert!(normalized.values.is_empty());
    }
}
