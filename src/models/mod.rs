//! Core data models for the payroll engine.
//!
//! This module contains the raw source tables, the reconciled employee record,
//! and the derived metric and allocation types.

pub mod columns;
mod employee;
mod metrics;
mod table;

pub use employee::{EmployeeColumns, EmployeeRecord};
pub use metrics::{
    AllocatedEmployee, AllocationOutcome, AuditStep, CostSplit, EmployeeMetrics, ScoredEmployee,
};
pub use table::{RawTable, SourceTables, normalize_cell};
