//! Response types for the payroll engine API.
//!
//! This module defines the success bodies and the error response structures
//! and error handling for the HTTP API.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::report::{BudgetSummary, GroupTotal, RecommendedEmployee};

/// Response body for the `/allocate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllocationResponse {
    /// Headline figures.
    pub summary: BudgetSummary,
    /// Recommended employees with the largest allocated raises.
    pub recommended: Vec<RecommendedEmployee>,
    /// Allocated raise per macro-region, largest first.
    pub by_mrf: Vec<GroupTotal>,
    /// Allocated raise per grade, largest first.
    pub by_grade: Vec<GroupTotal>,
}

/// JSON error body returned by every failing endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Stable machine-readable code, e.g. `INVALID_BUDGET`.
    pub code: String,
    /// Message for humans.
    pub message: String,
    /// Underlying engine error text, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates an error carrying the engine error text.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Request body could not be decoded.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an invalid query error response.
    pub fn invalid_query(message: impl Into<String>) -> Self {
        Self::new("INVALID_QUERY", message)
    }

    /// Creates an employee not found error response.
    pub fn employee_not_found(personnel_number: &str) -> Self {
        Self::with_details(
            "EMPLOYEE_NOT_FOUND",
            format!("Employee not found: {}", personnel_number),
            format!(
                "No reconciled employee has personnel number '{}'",
                personnel_number
            ),
        )
    }
}

/// An error body paired with the status it is sent with.
pub struct ApiErrorResponse {
    /// Response status.
    pub status: StatusCode,
    /// Response body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates an error response with the given status.
    pub fn new(status: StatusCode, error: ApiError) -> Self {
        Self { status, error }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        let message = error.to_string();
        match error {
            EngineError::InvalidBudget { .. } => ApiErrorResponse::new(
                StatusCode::BAD_REQUEST,
                ApiError::new("INVALID_BUDGET", message),
            ),
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("CONFIG_ERROR", "Configuration error", message),
                )
            }
            EngineError::SourceNotFound { .. } | EngineError::SourceParseError { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("SOURCE_ERROR", "Source data error", message),
                )
            }
            EngineError::MissingColumn { .. } | EngineError::NoCommonColumns { .. } => {
                ApiErrorResponse::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiError::with_details("SCHEMA_ERROR", "Source schema error", message),
                )
            }
            EngineError::OutputError { .. } => ApiErrorResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::with_details("OUTPUT_ERROR", "Output error", message),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_employee_not_found_error() {
        let error = ApiError::employee_not_found("1001");
        assert_eq!(error.code, "EMPLOYEE_NOT_FOUND");
        assert!(error.message.contains("1001"));
    }

    #[test]
    fn test_invalid_budget_is_client_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidBudget {
            message: "budget must not be negative, got -1".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "INVALID_BUDGET");
    }

    #[test]
    fn test_schema_error_is_server_error() {
        let api_error: ApiErrorResponse = EngineError::MissingColumn {
            table: "employees".to_string(),
            column: "Грейд".to_string(),
        }
        .into();
        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "SCHEMA_ERROR");
        assert!(api_error.error.details.unwrap().contains("Грейд"));
    }
}
