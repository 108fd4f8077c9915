//! Allocated raise per macro-region or grade.

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{AllocatedEmployee, AllocationOutcome};

/// The dimension a breakdown groups by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupBy {
    /// Macro-region.
    Mrf,
    /// Grade.
    Grade,
}

impl GroupBy {
    fn key<'a>(&self, employee: &'a AllocatedEmployee) -> Option<&'a str> {
        let record = &employee.employee.record;
        match self {
            GroupBy::Mrf => record.mrf.as_deref(),
            GroupBy::Grade => record.grade.as_deref(),
        }
    }
}

impl fmt::Display for GroupBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupBy::Mrf => write!(f, "mrf"),
            GroupBy::Grade => write!(f, "grade"),
        }
    }
}

/// Allocated raise summed over one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    /// Group value.
    pub group: String,
    /// Sum of allocated raises in the group.
    pub total_raise: Decimal,
}

/// Sums allocated raises per group, largest first.
///
/// Employees without a group value are left out. Equal totals are ordered by
/// group name.
pub fn raise_by_group(outcome: &AllocationOutcome, by: GroupBy) -> Vec<GroupTotal> {
    let mut totals: HashMap<&str, Decimal> = HashMap::new();
    for employee in &outcome.employees {
        if let Some(group) = by.key(employee) {
            let total = totals.entry(group).or_default();
            *total = total.saturating_add(employee.allocated_raise);
        }
    }

    let mut totals: Vec<GroupTotal> = totals
        .into_iter()
        .map(|(group, total_raise)| GroupTotal {
            group: group.to_string(),
            total_raise,
        })
        .collect();
    totals.sort_by(|a, b| {
        b.total_raise
            .cmp(&a.total_raise)
            .then_with(|| a.group.cmp(&b.group))
    });
    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::test_support::{employee, outcome};

    fn dec(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn sample() -> AllocationOutcome {
        outcome(
            vec![
                employee("1", Some("Центр"), Some("G10"), dec(10_000)),
                employee("2", Some("Волга"), Some("G10"), dec(4_000)),
                employee("3", Some("Центр"), Some("G11"), dec(3_000)),
                employee("4", None, Some("G12"), dec(7_000)),
                employee("5", Some("Юг"), None, dec(0)),
            ],
            dec(100_000),
        )
    }

    #[test]
    fn test_by_mrf_drops_missing_group() {
        let totals = raise_by_group(&sample(), GroupBy::Mrf);

        assert_eq!(
            totals,
            vec![
                GroupTotal { group: "Центр".to_string(), total_raise: dec(13_000) },
                GroupTotal { group: "Волга".to_string(), total_raise: dec(4_000) },
                GroupTotal { group: "Юг".to_string(), total_raise: dec(0) },
            ]
        );
    }

    #[test]
    fn test_by_grade_sorted_descending() {
        let totals = raise_by_group(&sample(), GroupBy::Grade);
        let groups: Vec<&str> = totals.iter().map(|t| t.group.as_str()).collect();
        assert_eq!(groups, vec!["G10", "G12", "G11"]);
    }

    #[test]
    fn test_equal_totals_ordered_by_name() {
        let outcome = outcome(
            vec![
                employee("1", Some("Б"), None, dec(5)),
                employee("2", Some("А"), None, dec(5)),
            ],
            dec(10),
        );
        let totals = raise_by_group(&outcome, GroupBy::Mrf);
        assert_eq!(totals[0].group, "А");
    }

    #[test]
    fn test_empty_outcome() {
        assert!(raise_by_group(&outcome(vec![], dec(10)), GroupBy::Grade).is_empty());
    }
}
