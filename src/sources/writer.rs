//! Persisted artifacts of a run.
//!
//! Each run replaces the artifacts wholesale: the enriched employee table, the
//! vacancy table and the per-group raise totals behind the charts. All files
//! are comma-separated UTF-8 with a header row.

use std::fs;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::columns::DERIVED_COLUMNS;
use crate::models::{AllocatedEmployee, RawTable};
use crate::pipeline::PipelineOutput;
use crate::report::{GroupBy, GroupTotal, raise_by_group};

/// File name of the enriched employee table.
pub const EMPLOYEES_FILE: &str = "employees_fot.csv";
/// File name of the vacancy table.
pub const VACANCIES_FILE: &str = "vacancies.csv";

/// Paths of the files written by one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenArtifacts {
    /// Enriched employee table.
    pub employees: PathBuf,
    /// Vacancy table.
    pub vacancies: PathBuf,
    /// Raise totals per macro-region.
    pub raise_by_mrf: PathBuf,
    /// Raise totals per grade.
    pub raise_by_grade: PathBuf,
}

/// Writes run artifacts into an output directory.
#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    output_dir: PathBuf,
}

impl ArtifactWriter {
    /// Creates a writer for the given directory.
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
        }
    }

    /// Writes every artifact, creating the output directory if needed.
    ///
    /// Returns `OutputError` naming the first path that could not be written.
    pub fn write(&self, output: &PipelineOutput) -> EngineResult<WrittenArtifacts> {
        fs::create_dir_all(&self.output_dir).map_err(|e| EngineError::OutputError {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let artifacts = WrittenArtifacts {
            employees: self.write_employees(&output.employee_headers, &output.outcome.employees)?,
            vacancies: self.write_table(VACANCIES_FILE, &output.vacancies)?,
            raise_by_mrf: self.write_group_totals(
                GroupBy::Mrf,
                &raise_by_group(&output.outcome, GroupBy::Mrf),
            )?,
            raise_by_grade: self.write_group_totals(
                GroupBy::Grade,
                &raise_by_group(&output.outcome, GroupBy::Grade),
            )?,
        };

        info!(output_dir = %self.output_dir.display(), "Artifacts written");
        Ok(artifacts)
    }

    fn write_employees(
        &self,
        headers: &[String],
        employees: &[AllocatedEmployee],
    ) -> EngineResult<PathBuf> {
        let header: Vec<&str> = headers
            .iter()
            .map(String::as_str)
            .chain(DERIVED_COLUMNS)
            .collect();

        let rows = employees.iter().map(|employee| {
            let mut row: Vec<String> = employee
                .employee
                .record
                .cells
                .iter()
                .map(|cell| cell.clone().unwrap_or_default())
                .collect();
            row.resize(headers.len(), String::new());
            row.extend(derived_cells(employee));
            row
        });

        self.write_csv(EMPLOYEES_FILE, &header, rows)
    }

    fn write_table(&self, file_name: &str, table: &RawTable) -> EngineResult<PathBuf> {
        let header: Vec<&str> = table.headers.iter().map(String::as_str).collect();
        let rows = table.rows.iter().map(|row| {
            row.iter()
                .map(|cell| cell.clone().unwrap_or_default())
                .collect::<Vec<String>>()
        });
        self.write_csv(file_name, &header, rows)
    }

    fn write_group_totals(&self, by: GroupBy, totals: &[GroupTotal]) -> EngineResult<PathBuf> {
        let rows = totals
            .iter()
            .map(|t| vec![t.group.clone(), format_decimal(Some(t.total_raise))]);
        let group_column = by.to_string();
        self.write_csv(
            &format!("raise_by_{}.csv", by),
            &[group_column.as_str(), "total_raise"],
            rows,
        )
    }

    fn write_csv<R>(&self, file_name: &str, header: &[&str], rows: R) -> EngineResult<PathBuf>
    where
        R: IntoIterator<Item = Vec<String>>,
    {
        let path = self.output_dir.join(file_name);
        let output_error = |e: csv::Error| EngineError::OutputError {
            path: path.display().to_string(),
            message: e.to_string(),
        };

        let mut writer = csv::WriterBuilder::new()
            .from_path(&path)
            .map_err(output_error)?;
        writer.write_record(header).map_err(output_error)?;
        for row in rows {
            writer.write_record(&row).map_err(output_error)?;
        }
        writer.flush().map_err(|e| EngineError::OutputError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        Ok(path)
    }
}

fn format_decimal(value: Option<Decimal>) -> String {
    value.map(|v| v.normalize().to_string()).unwrap_or_default()
}

fn derived_cells(allocated: &AllocatedEmployee) -> Vec<String> {
    let m = &allocated.employee.metrics;
    let recommended = if m.raise_recommended { "True" } else { "False" };
    vec![
        format_decimal(m.bonus_multiplier),
        format_decimal(m.total_allowances),
        format_decimal(m.base_pay),
        format_decimal(m.total_pay),
        format_decimal(m.total_pay_split.opex),
        format_decimal(m.total_pay_split.capex),
        format_decimal(m.total_pay_split.o2o),
        format_decimal(m.total_pay_with_contributions),
        format_decimal(m.tenure_years),
        format_decimal(m.paid_ratio),
        recommended.to_string(),
        format_decimal(m.desired_raise),
        format_decimal(m.projected_pay_uncapped),
        format_decimal(Some(allocated.allocated_raise)),
        format_decimal(allocated.projected_pay_capped),
    ]
}
