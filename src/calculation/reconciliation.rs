//! Source reconciliation.
//!
//! Joins the seven source tables into one row per staffed position and
//! separates open positions. Positions, org units, salaries, projects and
//! bonuses are inner-joined on all of their shared columns; the market
//! benchmark and the insurance rate are optional enrichments joined on
//! explicit keys.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{EngineError, EngineResult};
use crate::models::columns::{MARKET_KEY, POSITION_ID, REGION, STATUS, VACANCY_STATUS};
use crate::models::{RawTable, SourceTables};

/// Name given to the reconciled employee table.
pub const EMPLOYEE_TABLE: &str = "employees";

/// Row counts observed while reconciling, for auditing dropped rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconciliationReport {
    /// Filled position rows before any join.
    pub filled_positions: usize,
    /// Vacant position rows separated out.
    pub vacancies: usize,
    /// Rows surviving each inner join, in join order.
    pub inner_join_rows: Vec<(String, usize)>,
    /// Filled positions lost across all inner joins.
    pub dropped_by_inner_joins: usize,
    /// Rows without a market benchmark match.
    pub benchmark_misses: usize,
    /// Rows without an insurance rate match.
    pub insurance_misses: usize,
    /// Rows removed as duplicates of an earlier position.
    pub duplicates_removed: usize,
    /// Rows in the final employee table.
    pub employees: usize,
}

/// The reconciled employee table and the separated vacancies.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// One row per staffed position.
    pub employees: RawTable,
    /// Vacant position rows, unmodified.
    pub vacancies: RawTable,
    /// Row counts for auditing.
    pub report: ReconciliationReport,
}

/// Splits a table into (filled, vacant) rows by the assignment status.
///
/// Returns `MissingColumn` if the table has no status column.
pub fn split_vacancies(table: &RawTable) -> EngineResult<(RawTable, RawTable)> {
    let status = table.require_column(STATUS)?;
    let is_vacancy = |row: &[Option<String>]| cell(row, status) == Some(VACANCY_STATUS);

    Ok((
        table.filter_rows(|row| !is_vacancy(row)),
        table.filter_rows(is_vacancy),
    ))
}

/// Inner-joins two tables on every column they share.
///
/// The output keeps the left columns followed by the right columns that are
/// not part of the key. Rows with a null in any key column never match.
/// Output rows follow the left table order, then the right table order for
/// multiple matches.
pub fn natural_join(left: &RawTable, right: &RawTable) -> EngineResult<RawTable> {
    let keys: Vec<&str> = left
        .headers
        .iter()
        .filter(|h| right.column_index(h).is_some())
        .map(String::as_str)
        .collect();

    if keys.is_empty() {
        return Err(EngineError::NoCommonColumns {
            left: left.name.clone(),
            right: right.name.clone(),
        });
    }

    Ok(join(left, right, &keys, false)?.0)
}

/// Left-joins `right` onto `left` on the given key columns.
///
/// Unmatched left rows keep nulls in the right-hand columns. A right-hand
/// column whose name already exists on the left is not added. Returns the
/// joined table and the number of unmatched left rows.
pub fn left_join(left: &RawTable, right: &RawTable, keys: &[&str]) -> EngineResult<(RawTable, usize)> {
    join(left, right, keys, true)
}

fn join(
    left: &RawTable,
    right: &RawTable,
    keys: &[&str],
    keep_unmatched: bool,
) -> EngineResult<(RawTable, usize)> {
    let left_keys = keys
        .iter()
        .map(|k| left.require_column(k))
        .collect::<EngineResult<Vec<_>>>()?;
    let right_keys = keys
        .iter()
        .map(|k| right.require_column(k))
        .collect::<EngineResult<Vec<_>>>()?;

    let added: Vec<usize> = (0..right.headers.len())
        .filter(|&i| !right_keys.contains(&i) && left.column_index(&right.headers[i]).is_none())
        .collect();

    let mut headers = left.headers.clone();
    headers.extend(added.iter().map(|&i| right.headers[i].clone()));
    let mut joined = RawTable::new(left.name.clone(), headers);

    let mut index: HashMap<Vec<&str>, Vec<usize>> = HashMap::new();
    for (row_idx, row) in right.rows.iter().enumerate() {
        if let Some(key) = key_of(row, &right_keys) {
            index.entry(key).or_default().push(row_idx);
        }
    }

    let mut unmatched = 0;
    for row in &left.rows {
        let matches = key_of(row, &left_keys).and_then(|key| index.get(&key));
        match matches {
            Some(right_rows) => {
                for &right_idx in right_rows {
                    let mut cells = row.clone();
                    cells.resize(left.headers.len(), None);
                    let right_row = &right.rows[right_idx];
                    cells.extend(added.iter().map(|&i| cell(right_row, i).map(str::to_string)));
                    joined.push_row(cells);
                }
            }
            None => {
                unmatched += 1;
                if keep_unmatched {
                    joined.push_row(row.clone());
                }
            }
        }
    }

    Ok((joined, unmatched))
}

fn key_of<'a>(row: &'a [Option<String>], key_columns: &[usize]) -> Option<Vec<&'a str>> {
    key_columns.iter().map(|&i| cell(row, i)).collect()
}

/// Cell of a row that may be shorter than its header.
fn cell(row: &[Option<String>], column: usize) -> Option<&str> {
    row.get(column).and_then(Option::as_deref)
}

/// Keeps the first row for every value of `key`; returns the number removed.
///
/// Rows with a null key are deduplicated among themselves.
pub fn deduplicate(table: &RawTable, key: &str) -> EngineResult<(RawTable, usize)> {
    let column = table.require_column(key)?;
    let mut seen: HashSet<Option<&str>> = HashSet::new();
    let mut kept = RawTable::new(table.name.clone(), table.headers.clone());
    for row in &table.rows {
        if seen.insert(cell(row, column)) {
            kept.push_row(row.clone());
        }
    }
    let removed = table.len() - kept.len();
    Ok((kept, removed))
}

/// Counts rows of `before` whose position identifier no longer appears in
/// `after`.
fn missing_positions(before: &RawTable, after: &RawTable) -> EngineResult<usize> {
    let before_column = before.require_column(POSITION_ID)?;
    let after_column = after.require_column(POSITION_ID)?;
    let present: HashSet<Option<&str>> = after
        .rows
        .iter()
        .map(|row| cell(row, after_column))
        .collect();

    Ok(before
        .rows
        .iter()
        .filter(|row| !present.contains(&cell(row, before_column)))
        .count())
}

/// Reconciles the source tables into employees and vacancies.
///
/// # Errors
///
/// Returns `MissingColumn` when a table lacks its status column or a join key,
/// and `NoCommonColumns` when two inner-joined tables share no columns. Empty
/// tables are not an error and produce an empty employee table.
pub fn reconcile(sources: &SourceTables) -> EngineResult<Reconciliation> {
    let (positions, vacancies) = split_vacancies(&sources.positions)?;
    let filled_positions = positions.len();

    let mut employees = positions.clone();
    employees.name = EMPLOYEE_TABLE.to_string();

    let mut inner_join_rows = Vec::with_capacity(4);
    for table in [
        &sources.org_units,
        &sources.salaries,
        &sources.projects,
        &sources.bonuses,
    ] {
        let (filled, _) = split_vacancies(table)?;
        employees = natural_join(&employees, &filled)?;
        debug!(table = %table.name, rows = employees.len(), "Inner join complete");
        inner_join_rows.push((table.name.clone(), employees.len()));
    }
    let dropped_by_inner_joins = missing_positions(&positions, &employees)?;

    let (employees, benchmark_misses) = left_join(&employees, &sources.market, &MARKET_KEY)?;
    let (employees, insurance_misses) = left_join(&employees, &sources.insurance, &[REGION])?;

    let (employees, duplicates_removed) = deduplicate(&employees, POSITION_ID)?;

    let report = ReconciliationReport {
        filled_positions,
        vacancies: vacancies.len(),
        inner_join_rows,
        dropped_by_inner_joins,
        benchmark_misses,
        insurance_misses,
        duplicates_removed,
        employees: employees.len(),
    };

    info!(
        employees = report.employees,
        vacancies = report.vacancies,
        dropped = report.dropped_by_inner_joins,
        benchmark_misses = report.benchmark_misses,
        insurance_misses = report.insurance_misses,
        duplicates = report.duplicates_removed,
        "Sources reconciled"
    );

    Ok(Reconciliation {
        employees,
        vacancies,
        report,
    })
}
