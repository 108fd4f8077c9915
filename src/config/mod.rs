//! Configuration loading and management for the payroll engine.
//!
//! This module provides functionality to load the payroll configuration from
//! a YAML file: source file names, declared pay components, the default
//! budget ceiling, and the raise recommendation thresholds.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load("./config/payroll.yaml").unwrap();
//! println!("Raise percent: {}", loader.config().policy.raise_percent);
//! ```

mod loader;
mod types;

pub use loader::{ConfigLoader, discover_pay_components};
pub use types::{DEFAULT_BUDGET, NeverRaisedPolicy, PayrollConfig, RaisePolicy, SourceFiles};
