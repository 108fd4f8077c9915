//! One complete run: reconcile, derive metrics, allocate.
//!
//! A run is a pure function of the source tables and its parameters. It holds
//! no shared state, so runs with different budgets or dates can execute
//! concurrently over the same tables.

use chrono::NaiveDate;
use tracing::info;

use crate::calculation::{Budget, ReconciliationReport, allocate, calculate_metrics, reconcile};
use crate::config::{ConfigLoader, RaisePolicy};
use crate::error::EngineResult;
use crate::models::{AllocationOutcome, RawTable, SourceTables};

/// Parameters of a single run.
#[derive(Debug, Clone)]
pub struct PipelineParams {
    /// Budget ceiling for all raises.
    pub budget: Budget,
    /// The current date used for tenure and raise cooldown.
    pub today: NaiveDate,
    /// Pay-component columns summed into allowances.
    pub pay_components: Vec<String>,
    /// Raise recommendation thresholds.
    pub policy: RaisePolicy,
}

impl PipelineParams {
    /// Builds parameters from the configuration.
    ///
    /// Pay components are resolved against the salary table: the declared list
    /// if any, otherwise the discovered one.
    pub fn from_config(
        config: &ConfigLoader,
        sources: &SourceTables,
        budget: Budget,
        today: NaiveDate,
    ) -> Self {
        Self {
            budget,
            today,
            pay_components: config.pay_components(&sources.salaries),
            policy: config.config().policy.clone(),
        }
    }
}

/// Everything a run produces.
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    /// Headers of the reconciled employee table, in source order.
    pub employee_headers: Vec<String>,
    /// Vacant position rows, unmodified.
    pub vacancies: RawTable,
    /// Row counts observed while reconciling.
    pub report: ReconciliationReport,
    /// Scored employees with their allocated raises.
    pub outcome: AllocationOutcome,
}

/// Runs the Reconciler, the Metric Engine and the Budget Allocator in order.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline;

impl Pipeline {
    /// Executes one run.
    ///
    /// # Errors
    ///
    /// Returns `MissingColumn` or `NoCommonColumns` for schema problems found
    /// during reconciliation or metric extraction. Bad cell values are never
    /// errors.
    pub fn run(sources: &SourceTables, params: &PipelineParams) -> EngineResult<PipelineOutput> {
        let reconciliation = reconcile(sources)?;
        let scored = calculate_metrics(
            &reconciliation.employees,
            &params.pay_components,
            params.today,
            &params.policy,
        )?;
        let outcome = allocate(scored, params.budget);

        info!(
            employees = outcome.employees.len(),
            vacancies = reconciliation.vacancies.len(),
            leftover = %outcome.leftover,
            "Pipeline run complete"
        );

        Ok(PipelineOutput {
            employee_headers: reconciliation.employees.headers,
            vacancies: reconciliation.vacancies,
            report: reconciliation.report,
            outcome,
        })
    }
}
