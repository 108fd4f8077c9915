//! Integration tests for the payroll engine.
//!
//! This test suite drives the whole run over source files on disk:
//! - Loading the seven tab-separated source tables
//! - Reconciliation row accounting
//! - Metrics, eligibility and proportional budget scaling
//! - Written artifacts
//! - The HTTP API

use std::fs;
use std::path::Path;
use std::str::FromStr;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use tempfile::TempDir;
use tower::ServiceExt;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::Budget;
use payroll_engine::config::{ConfigLoader, SourceFiles};
use payroll_engine::models::SourceTables;
use payroll_engine::pipeline::{Pipeline, PipelineOutput, PipelineParams};
use payroll_engine::sources::{ArtifactWriter, SourceLoader};

// =============================================================================
// Test Helpers
// =============================================================================

fn decimal(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
}

fn write_tsv(dir: &Path, name: &str, rows: &[&[&str]]) {
    let content: String = rows.iter().map(|row| row.join("\t") + "\n").collect();
    fs::write(dir.join(name), format!("\u{feff}{}", content)).unwrap();
}

/// Three staffed engineers and analysts, one vacancy, and one position with
/// no salary row.
fn write_sources(dir: &Path) {
    let files = SourceFiles::default();

    write_tsv(dir, &files.positions, &[
        &["Имя штатной единицы", "Таб. №", "Ф.И.О.", "Статус назначения", "РФ"],
        &["ШЕ-1", "1001", "Иванов Иван", "Работает", "77"],
        &["ШЕ-2", "1002", "Петров Пётр", "Работает", "77"],
        &["ШЕ-3", "1003", "Сидорова Анна", "Работает", "16"],
        &["ШЕ-4", "", "", "Вакансия", "77"],
        &["ШЕ-5", "1005", "Орлов Олег", "Работает", "50"],
    ]);
    write_tsv(dir, &files.org_units, &[
        &[
            "Имя штатной единицы",
            "Статус назначения",
            "Структурное подразделение - полный путь с группирующими",
            "Код функции",
            "Дата приема",
            "МРФ",
        ],
        &["ШЕ-1", "Работает", "Москва/ИТ", "F01", "01.02.2015", "Центр"],
        &["ШЕ-2", "Работает", "Москва/ИТ", "F01", "15.03.2018", "Центр"],
        &["ШЕ-3", "Работает", "Казань/ИТ", "F02", "01.06.2019", "Волга"],
        &["ШЕ-5", "Работает", "Москва/ИТ", "F01", "01.01.2020", "Центр"],
    ]);
    write_tsv(dir, &files.salaries, &[
        &[
            "Имя штатной единицы",
            "Статус назначения",
            "Кол-во единиц",
            "Дата последнего повышения",
            "Тарифная ставка (оклад), руб.",
            "Надбавка за стаж",
        ],
        &["ШЕ-1", "Работает", "1", "2023-10-19", "100000", ""],
        &["ШЕ-2", "Работает", "1", "2022-01-10", "80000", "5000"],
        &["ШЕ-3", "Работает", "1", "", "60000", ""],
    ]);
    write_tsv(dir, &files.projects, &[
        &[
            "Имя штатной единицы",
            "Статус назначения",
            "Должность /профессия (разряд, категория)",
            "Грейд",
            "OPEX",
            "CAPEX",
            "O2O",
        ],
        &["ШЕ-1", "Работает", "Инженер", "G10", "60", "40", "0"],
        &["ШЕ-2", "Работает", "Инженер", "G10", "100", "0", "0"],
        &["ШЕ-3", "Работает", "Аналитик", "G09", "100", "0", "0"],
        &["ШЕ-5", "Работает", "Инженер", "G10", "100", "0", "0"],
    ]);
    write_tsv(dir, &files.bonuses, &[
        &[
            "Имя штатной единицы",
            "Статус назначения",
            "Процент месячной премии",
            "Процент квартальной премии",
            "Процент годовой премии",
        ],
        &["ШЕ-1", "Работает", "0", "0", "0"],
        &["ШЕ-2", "Работает", "0", "0", "0"],
        &["ШЕ-3", "Работает", "0", "0", "0"],
        &["ШЕ-5", "Работает", "0", "0", "0"],
    ]);
    write_tsv(dir, &files.insurance, &[
        &["РФ", "Процентр страховых взносов"],
        &["77", "30"],
        &["16", "30"],
    ]);
    write_tsv(dir, &files.market, &[
        &[
            "Структурное подразделение - полный путь с группирующими",
            "Код функции",
            "Должность /профессия (разряд, категория)",
            "Грейд",
            "ФОТ по рынку",
        ],
        &["Москва/ИТ", "F01", "Инженер", "G10", "150000"],
    ]);
}

fn load_sources() -> (TempDir, SourceTables) {
    let dir = TempDir::new().unwrap();
    write_sources(dir.path());
    let sources = SourceLoader::new(dir.path(), &SourceFiles::default())
        .load()
        .unwrap();
    (dir, sources)
}

fn run(sources: &SourceTables, budget: &str) -> PipelineOutput {
    let params = PipelineParams::from_config(
        &ConfigLoader::default(),
        sources,
        Budget::new(decimal(budget)).unwrap(),
        today(),
    );
    Pipeline::run(sources, &params).unwrap()
}

fn allocated(output: &PipelineOutput, personnel_number: &str) -> Decimal {
    output
        .outcome
        .employees
        .iter()
        .find(|e| e.employee.record.personnel_number.as_deref() == Some(personnel_number))
        .map(|e| e.allocated_raise)
        .unwrap()
}

async fn post_allocate(router: Router, body: Value) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/allocate")
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

// =============================================================================
// Pipeline
// =============================================================================

#[test]
fn test_reconciliation_accounts_for_every_row() {
    let (_dir, sources) = load_sources();

    let output = run(&sources, "10000000");

    assert_eq!(output.report.filled_positions, 4);
    assert_eq!(output.report.vacancies, 1);
    assert_eq!(output.report.dropped_by_inner_joins, 1);
    assert_eq!(output.report.benchmark_misses, 1);
    assert_eq!(output.report.insurance_misses, 0);
    assert_eq!(output.report.employees, 3);
    assert_eq!(output.vacancies.len(), 1);
}

#[test]
fn test_budget_above_demand_grants_every_raise() {
    let (_dir, sources) = load_sources();

    let output = run(&sources, "10000000");

    assert_eq!(output.outcome.total_desired, decimal("54000"));
    assert_eq!(output.outcome.scale, Decimal::ONE);
    assert_eq!(allocated(&output, "1001"), decimal("30000"));
    assert_eq!(allocated(&output, "1002"), decimal("24000"));
    assert_eq!(allocated(&output, "1003"), Decimal::ZERO);
    assert_eq!(output.outcome.leftover, decimal("9946000"));
}

#[test]
fn test_budget_below_demand_scales_proportionally() {
    let (_dir, sources) = load_sources();

    let output = run(&sources, "27000");

    assert_eq!(output.outcome.scale, decimal("0.5"));
    assert_eq!(allocated(&output, "1001"), decimal("15000"));
    assert_eq!(allocated(&output, "1002"), decimal("12000"));
    assert_eq!(output.outcome.total_allocated, decimal("27000"));
    assert_eq!(output.outcome.leftover, Decimal::ZERO);
}

#[test]
fn test_metrics_from_source_files() {
    let (_dir, sources) = load_sources();

    let output = run(&sources, "10000000");
    let first = &output.outcome.employees[0].employee;

    assert_eq!(first.record.personnel_number.as_deref(), Some("1001"));
    assert_eq!(first.metrics.total_pay, Some(decimal("100000")));
    assert_eq!(first.metrics.total_pay_split.opex, Some(decimal("60000")));
    assert_eq!(first.metrics.total_pay_split.capex, Some(decimal("40000")));
    assert_eq!(first.metrics.total_pay_with_contributions, Some(decimal("130000")));

    let analyst = &output.outcome.employees[2].employee;
    assert_eq!(analyst.metrics.market_pay, None);
    assert_eq!(analyst.metrics.paid_ratio, None);
    assert!(!analyst.metrics.raise_recommended);
}

#[test]
fn test_artifacts_written_from_run() {
    let (dir, sources) = load_sources();
    let output = run(&sources, "27000");
    let out_dir = dir.path().join("output");

    let written = ArtifactWriter::new(&out_dir).write(&output).unwrap();

    let employees = fs::read_to_string(&written.employees).unwrap();
    assert_eq!(employees.lines().count(), 4);
    assert!(employees.lines().next().unwrap().contains("Повышение по лимиту"));

    let by_mrf = fs::read_to_string(&written.raise_by_mrf).unwrap();
    assert_eq!(
        by_mrf.lines().collect::<Vec<_>>(),
        vec!["mrf,total_raise", "Центр,27000", "Волга,0"]
    );
}

// =============================================================================
// HTTP API
// =============================================================================

#[tokio::test]
async fn test_api_allocate_dashboard() {
    let (_dir, sources) = load_sources();
    let router = create_router(AppState::new(ConfigLoader::default(), sources));

    let (status, body) = post_allocate(
        router,
        json!({"budget": "27000", "current_date": "2026-10-19", "top": 1}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"]["total_employees"], 3);
    assert_eq!(body["summary"]["recommended_count"], 2);
    assert_eq!(body["recommended"].as_array().unwrap().len(), 1);
    assert_eq!(body["recommended"][0]["personnel_number"], "1001");
    assert_eq!(body["by_grade"][0]["group"], "G10");
}

#[tokio::test]
async fn test_api_concurrent_budgets_are_independent() {
    let (_dir, sources) = load_sources();
    let router = create_router(AppState::new(ConfigLoader::default(), sources));

    let small = post_allocate(
        router.clone(),
        json!({"budget": "27000", "current_date": "2026-10-19"}),
    );
    let large = post_allocate(
        router,
        json!({"budget": "10000000", "current_date": "2026-10-19"}),
    );
    let ((_, small), (_, large)) = tokio::join!(small, large);

    assert_eq!(
        Decimal::from_str(small["summary"]["scale"].as_str().unwrap()).unwrap(),
        decimal("0.5")
    );
    assert_eq!(
        Decimal::from_str(large["summary"]["leftover"].as_str().unwrap()).unwrap(),
        decimal("9946000")
    );
}

#[tokio::test]
async fn test_api_negative_budget_rejected() {
    let (_dir, sources) = load_sources();
    let router = create_router(AppState::new(ConfigLoader::default(), sources));

    let (status, body) = post_allocate(router, json!({"budget": "-100"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "INVALID_BUDGET");
}

#[tokio::test]
async fn test_api_employee_lookup() {
    let (_dir, sources) = load_sources();
    let router = create_router(AppState::new(ConfigLoader::default(), sources));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/employees/1002?current_date=2026-10-19")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let view: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(view["full_name"], "Петров Пётр");
    assert_eq!(view["grade"], "G10");
}
