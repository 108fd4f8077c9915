//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the payroll
//! configuration from a YAML file and resolving the pay-component columns.

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::RawTable;
use crate::models::columns::SALARY_NON_COMPONENT_COLUMNS;

use super::types::PayrollConfig;

/// Loads and provides access to the payroll configuration.
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/payroll.yaml")?;
/// println!("Budget: {}", loader.config().budget);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from a YAML file.
    ///
    /// Returns `ConfigNotFound` if the file cannot be read and
    /// `ConfigParseError` if it is not valid YAML for [`PayrollConfig`] or the
    /// source delimiter is not ASCII.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config: PayrollConfig =
            serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str.clone(),
                message: e.to_string(),
            })?;

        if config.sources.delimiter_byte().is_none() {
            return Err(EngineError::ConfigParseError {
                path: path_str,
                message: format!(
                    "sources.delimiter must be an ASCII character, got {:?}",
                    config.sources.delimiter
                ),
            });
        }

        Ok(Self { config })
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: PayrollConfig) -> Self {
        Self { config }
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Returns the pay-component columns for the given salary table.
    ///
    /// Declared components are returned as configured. Without a declaration
    /// every salary column outside the fixed non-component set is taken, and
    /// the discovered list is logged so that schema drift stays visible.
    pub fn pay_components(&self, salaries: &RawTable) -> Vec<String> {
        if let Some(declared) = &self.config.pay_components {
            return declared.clone();
        }

        let discovered = discover_pay_components(salaries);
        warn!(
            table = %salaries.name,
            components = ?discovered,
            "Pay components not declared, discovered from salary table headers"
        );
        discovered
    }
}

/// Returns every salary column that is not in the fixed non-component set.
pub fn discover_pay_components(salaries: &RawTable) -> Vec<String> {
    salaries
        .headers
        .iter()
        .filter(|h| !SALARY_NON_COMPONENT_COLUMNS.contains(&h.as_str()))
        .cloned()
        .collect()
}
