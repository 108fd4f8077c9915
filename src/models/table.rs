//! Raw tabular data as it arrives from the source files.
//!
//! Every cell is kept as an optional string. Numeric and date coercion happens
//! later, in the metric engine, so that the reconciler can join on the exact
//! text of the sources.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

/// Cell values read as missing, in addition to blank cells.
const NULL_MARKERS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Converts a raw cell into an optional value.
///
/// Blank, whitespace-only and conventional null markers become `None`.
///
/// # Examples
///
/// ```
/// use payroll_engine::models::normalize_cell;
///
/// assert_eq!(normalize_cell("  "), None);
/// assert_eq!(normalize_cell("NaN"), None);
/// assert_eq!(normalize_cell("42,5"), Some("42,5".to_string()));
/// ```
pub fn normalize_cell(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || NULL_MARKERS.contains(&trimmed) {
        None
    } else {
        Some(raw.to_string())
    }
}

/// A named table of string cells.
///
/// Rows always have exactly `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawTable {
    /// Name used in error messages and logs.
    pub name: String,
    /// Column names in source order.
    pub headers: Vec<String>,
    /// Row cells, aligned with `headers`.
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Creates an empty table with the given columns.
    pub fn new(name: impl Into<String>, headers: Vec<String>) -> Self {
        Self {
            name: name.into(),
            headers,
            rows: Vec::new(),
        }
    }

    /// Builds a table from string literals, normalizing each cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use payroll_engine::models::RawTable;
    ///
    /// let table = RawTable::from_strings("insurance", &["РФ", "Процентр страховых взносов"], &[
    ///     &["77", "0,302"],
    ///     &["50", ""],
    /// ]);
    /// assert_eq!(table.len(), 2);
    /// assert_eq!(table.cell(1, 1), None);
    /// ```
    pub fn from_strings(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        let mut table = Self::new(name, headers.iter().map(|h| h.to_string()).collect());
        for row in rows {
            table.push_row(row.iter().map(|cell| normalize_cell(cell)).collect());
        }
        table
    }

    /// Appends a row, padding or truncating it to the header width.
    pub fn push_row(&mut self, mut row: Vec<Option<String>>) {
        row.resize(self.headers.len(), None);
        self.rows.push(row);
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the position of a column, if present.
    pub fn column_index(&self, column: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == column)
    }

    /// Returns the position of a column, or a `MissingColumn` error.
    pub fn require_column(&self, column: &str) -> EngineResult<usize> {
        self.column_index(column)
            .ok_or_else(|| EngineError::MissingColumn {
                table: self.name.clone(),
                column: column.to_string(),
            })
    }

    /// Returns a cell value.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|cells| cells.get(column))
            .and_then(|cell| cell.as_deref())
    }

    /// Returns a copy of this table holding only the rows matching `keep`.
    pub fn filter_rows<F>(&self, mut keep: F) -> RawTable
    where
        F: FnMut(&[Option<String>]) -> bool,
    {
        RawTable {
            name: self.name.clone(),
            headers: self.headers.clone(),
            rows: self.rows.iter().filter(|row| keep(row)).cloned().collect(),
        }
    }
}

/// The seven source tables the engine consumes.
#[derive(Debug, Clone, Default)]
pub struct SourceTables {
    /// Staff positions, filled and vacant.
    pub positions: RawTable,
    /// Tariff rates, allowances, headcount units and last-raise dates.
    pub salaries: RawTable,
    /// Organizational units, block codes and hire dates.
    pub org_units: RawTable,
    /// Project cost allocation (OPEX/CAPEX/O2O).
    pub projects: RawTable,
    /// Bonus percentages.
    pub bonuses: RawTable,
    /// Insurance contribution rates per region.
    pub insurance: RawTable,
    /// Market benchmark compensation.
    pub market: RawTable,
}
