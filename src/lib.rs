//! Compensation model and budget-capped raise allocation engine.
//!
//! This crate reconciles the workforce source tables into one record per
//! staffed position, derives pay metrics and a raise recommendation for each
//! employee, and scales the recommended raises down proportionally when their
//! sum exceeds the available budget.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sources;
