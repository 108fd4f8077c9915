//! Error types for the payroll engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Only structural problems surface here: missing files, missing columns,
//! impossible joins and invalid budgets. Dirty cell values never do; they are
//! coerced to nulls by the calculation layer.

use thiserror::Error;

/// The main error type for the payroll engine.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
///
/// let error = EngineError::MissingColumn {
///     table: "salaries".to_string(),
///     column: "Таб. №".to_string(),
/// };
/// assert_eq!(error.to_string(), "Table 'salaries' is missing required column 'Таб. №'");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A source table file was not found.
    #[error("Source file not found: {path}")]
    SourceNotFound {
        /// The path that was not found.
        path: String,
    },

    /// A source table file could not be read as delimited text.
    #[error("Failed to read source file '{path}': {message}")]
    SourceParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A table lacks a column the engine requires.
    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn {
        /// The name of the table.
        table: String,
        /// The missing column.
        column: String,
    },

    /// A natural join was requested between tables with no shared columns.
    #[error("Tables '{left}' and '{right}' share no columns to join on")]
    NoCommonColumns {
        /// The left-hand table.
        left: String,
        /// The right-hand table.
        right: String,
    },

    /// The budget ceiling was negative or not a finite number.
    #[error("Invalid budget: {message}")]
    InvalidBudget {
        /// A description of what made the budget invalid.
        message: String,
    },

    /// An output artifact could not be written.
    #[error("Failed to write output '{path}': {message}")]
    OutputError {
        /// The path being written.
        path: String,
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/payroll.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/payroll.yaml"
        );
    }

    #[test]
    fn test_missing_column_displays_table_and_column() {
        let error = EngineError::MissingColumn {
            table: "market".to_string(),
            column: "Грейд".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Table 'market' is missing required column 'Грейд'"
        );
    }

    #[test]
    fn test_no_common_columns_displays_both_tables() {
        let error = EngineError::NoCommonColumns {
            left: "positions".to_string(),
            right: "projects".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Tables 'positions' and 'projects' share no columns to join on"
        );
    }

    #[test]
    fn test_invalid_budget_displays_message() {
        let error = EngineError::InvalidBudget {
            message: "budget must not be negative".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid budget: budget must not be negative"
        );
    }

    #[test]
    fn test_source_parse_error_displays_path_and_message() {
        let error = EngineError::SourceParseError {
            path: "data/Проекты.csv".to_string(),
            message: "invalid UTF-8".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to read source file 'data/Проекты.csv': invalid UTF-8"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_missing_column() -> EngineResult<()> {
            Err(EngineError::MissingColumn {
                table: "bonuses".to_string(),
                column: "Статус назначения".to_string(),
            })
        }

        fn propagates_error() -> EngineResult<()> {
            returns_missing_column()?;
            Ok(())
        }

        assert!(propagates_error().is_err());
    }
}
