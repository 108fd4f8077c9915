//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints. Every
//! request runs its own pipeline over the shared source tables, so requests
//! with different budgets never affect each other.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::Budget;
use crate::error::EngineError;
use crate::models::AllocationOutcome;
use crate::pipeline::{Pipeline, PipelineOutput, PipelineParams};
use crate::report::{
    BudgetSummary, DASHBOARD_TOP_GROUPS, DASHBOARD_TOP_RECOMMENDED, GroupBy, GroupTotal,
    find_by_personnel_number, raise_by_group, top_recommended,
};

use super::request::{AllocationRequest, EmployeeQuery};
use super::response::{AllocationResponse, ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/allocate", post(allocate_handler))
        .route("/employees/:personnel_number", get(employee_handler))
        .with_state(state)
}

/// Handler for POST /allocate endpoint.
///
/// Runs the pipeline with the requested budget and returns the dashboard
/// figures.
async fn allocate_handler(
    State(state): State<AppState>,
    payload: Result<Json<AllocationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing allocation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            let error = match rejection {
                JsonRejection::JsonDataError(err) => {
                    let body_text = err.body_text();
                    warn!(
                        correlation_id = %correlation_id,
                        error = %body_text,
                        "JSON data error"
                    );
                    ApiError::malformed_json(body_text)
                }
                JsonRejection::JsonSyntaxError(err) => {
                    warn!(
                        correlation_id = %correlation_id,
                        error = %err,
                        "JSON syntax error"
                    );
                    ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
                }
                JsonRejection::MissingJsonContentType(_) => {
                    ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
                }
                _ => ApiError::malformed_json("Failed to parse request body"),
            };
            return json_response(StatusCode::BAD_REQUEST, error);
        }
    };

    let budget = request
        .budget
        .unwrap_or(state.config().config().budget);
    let today = request.current_date.unwrap_or_else(today);
    let top = request.top.unwrap_or(DASHBOARD_TOP_RECOMMENDED);

    let start_time = Instant::now();
    match run_pipeline(&state, budget, today) {
        Ok(output) => {
            let outcome = &output.outcome;
            let response = AllocationResponse {
                summary: BudgetSummary::from_outcome(outcome),
                recommended: top_recommended(outcome, top),
                by_mrf: top_groups(outcome, GroupBy::Mrf),
                by_grade: top_groups(outcome, GroupBy::Grade),
            };
            info!(
                correlation_id = %correlation_id,
                budget = %budget,
                today = %today,
                recommended = response.summary.recommended_count,
                leftover = %response.summary.leftover,
                duration_us = start_time.elapsed().as_micros(),
                "Allocation completed successfully"
            );
            json_response(StatusCode::OK, response)
        }
        Err(err) => error_response(correlation_id, err),
    }
}

/// Handler for GET /employees/:personnel_number endpoint.
///
/// Returns the compensation position of one employee.
async fn employee_handler(
    State(state): State<AppState>,
    Path(personnel_number): Path<String>,
    query: Result<Query<EmployeeQuery>, QueryRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing employee request");

    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => {
            warn!(
                correlation_id = %correlation_id,
                error = %rejection.body_text(),
                "Invalid query string"
            );
            return json_response(
                StatusCode::BAD_REQUEST,
                ApiError::invalid_query(rejection.body_text()),
            );
        }
    };

    let today = query.current_date.unwrap_or_else(today);
    let budget = state.config().config().budget;

    let output = match run_pipeline(&state, budget, today) {
        Ok(output) => output,
        Err(err) => return error_response(correlation_id, err),
    };

    match find_by_personnel_number(&output.outcome, &personnel_number) {
        Some(view) => {
            info!(correlation_id = %correlation_id, "Employee found");
            json_response(StatusCode::OK, view)
        }
        None => {
            warn!(correlation_id = %correlation_id, "Employee not found");
            json_response(
                StatusCode::NOT_FOUND,
                ApiError::employee_not_found(&personnel_number),
            )
        }
    }
}

fn run_pipeline(
    state: &AppState,
    budget: Decimal,
    today: NaiveDate,
) -> Result<PipelineOutput, EngineError> {
    let budget = Budget::new(budget)?;
    let params = PipelineParams::from_config(state.config(), state.sources(), budget, today);
    Pipeline::run(state.sources(), &params)
}

fn top_groups(outcome: &AllocationOutcome, by: GroupBy) -> Vec<GroupTotal> {
    let mut totals = raise_by_group(outcome, by);
    totals.truncate(DASHBOARD_TOP_GROUPS);
    totals
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn json_response<T: serde::Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

fn error_response(correlation_id: Uuid, err: EngineError) -> Response {
    warn!(
        correlation_id = %correlation_id,
        error = %err,
        "Request failed"
    );
    let api_error: ApiErrorResponse = err.into();
    json_response(api_error.status, api_error.error)
}
