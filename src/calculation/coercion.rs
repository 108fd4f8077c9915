//! Numeric and date coercion of raw cell text.
//!
//! Coercion never fails: a value that cannot be read becomes `None` and the
//! caller decides whether `None` defaults to zero or propagates.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Format of the last-raise date.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Formats tried, in order, for day-first dates such as the hire date.
const DAY_FIRST_FORMATS: &[&str] = &["%d.%m.%Y", "%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Parses a decimal number written with either `.` or `,` as separator.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_decimal;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_decimal(Some("1234,5")), Some(Decimal::new(12345, 1)));
/// assert_eq!(parse_decimal(Some("1.5e3")), Some(Decimal::from(1500)));
/// assert_eq!(parse_decimal(Some("n/a")), None);
/// assert_eq!(parse_decimal(None), None);
/// ```
pub fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    let text = raw?.trim().replace(',', ".");
    if text.is_empty() {
        return None;
    }

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Parses an ISO `YYYY-MM-DD` date.
pub fn parse_iso_date(raw: Option<&str>) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw?.trim(), ISO_DATE_FORMAT).ok()
}

/// Parses a day-first date, ignoring any time-of-day suffix.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::parse_day_first_date;
/// use chrono::NaiveDate;
///
/// let expected = NaiveDate::from_ymd_opt(2015, 2, 1);
/// assert_eq!(parse_day_first_date(Some("01.02.2015")), expected);
/// assert_eq!(parse_day_first_date(Some("01/02/2015 0:00:00")), expected);
/// assert_eq!(parse_day_first_date(Some("2015-02-01")), expected);
/// assert_eq!(parse_day_first_date(Some("31.02.2015")), None);
/// ```
pub fn parse_day_first_date(raw: Option<&str>) -> Option<NaiveDate> {
    let date_part = raw?
        .trim()
        .split(|c: char| c.is_whitespace() || c == 'T')
        .next()?;

    DAY_FIRST_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(date_part, format).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_decimal_accepts_both_separators() {
        assert_eq!(parse_decimal(Some("0.302")), Some(dec("0.302")));
        assert_eq!(parse_decimal(Some("0,302")), Some(dec("0.302")));
    }

    #[test]
    fn test_parse_decimal_trims_whitespace() {
        assert_eq!(parse_decimal(Some("  100000 ")), Some(dec("100000")));
    }

    #[test]
    fn test_parse_decimal_negative() {
        assert_eq!(parse_decimal(Some("-12,5")), Some(dec("-12.5")));
    }

    #[test]
    fn test_parse_decimal_garbage_is_none() {
        assert_eq!(parse_decimal(Some("сто тысяч")), None);
        assert_eq!(parse_decimal(Some("1 000")), None);
        assert_eq!(parse_decimal(Some("")), None);
        assert_eq!(parse_decimal(Some("inf")), None);
    }

    #[test]
    fn test_parse_iso_date() {
        assert_eq!(
            parse_iso_date(Some("2021-03-01")),
            NaiveDate::from_ymd_opt(2021, 3, 1)
        );
    }

    #[test]
    fn test_parse_iso_date_rejects_day_first() {
        assert_eq!(parse_iso_date(Some("01.03.2021")), None);
        assert_eq!(parse_iso_date(Some("2021-13-01")), None);
        assert_eq!(parse_iso_date(None), None);
    }

    #[test]
    fn test_parse_day_first_prefers_day_over_month() {
        assert_eq!(
            parse_day_first_date(Some("05/04/2020")),
            NaiveDate::from_ymd_opt(2020, 4, 5)
        );
    }

    #[test]
    fn test_parse_day_first_garbage_is_none() {
        assert_eq!(parse_day_first_date(Some("вчера")), None);
        assert_eq!(parse_day_first_date(Some("   ")), None);
    }
}
