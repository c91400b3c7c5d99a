//! Response types for the WCP compliance API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, ExtractionError};
use crate::models::{Decision, DecisionStats};

/// Success envelope for decision endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    /// Always `true`.
    pub success: bool,
    /// The compliance decision.
    pub data: Decision,
}

impl AnalyzeResponse {
    /// Wraps a decision.
    pub fn new(data: Decision) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Outcome of one entry in a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchItem {
    /// Position of the entry in the request.
    pub index: usize,
    /// The submitted content.
    pub content: String,
    /// True when a decision was produced.
    pub success: bool,
    /// The decision, when successful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Decision>,
    /// The error, when unsuccessful.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

/// Per-entry results and a summary of the decisions among them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResult {
    /// One item per submitted entry, in request order.
    pub results: Vec<BatchItem>,
    /// Statistics over the successful entries.
    pub stats: DecisionStats,
}

/// Success envelope for `/analyze/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchAnalyzeResponse {
    /// Always `true`; individual entries carry their own `success`.
    pub success: bool,
    /// Results and statistics.
    pub data: BatchResult,
}

/// Body of `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` when the service answers.
    pub status: String,
    /// Engine version.
    pub version: String,
    /// Name of the explanation provider in use.
    pub provider: String,
    /// Roles in the rate table.
    pub roles: Vec<String>,
}

/// API error structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
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

    /// Creates a new API error with details.
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

    /// Creates an extraction error response naming the offending field.
    pub fn extraction(error: &ExtractionError) -> Self {
        let details = match error {
            ExtractionError::InputTooShort { .. } => {
                "Submit the full payroll entry with Role, Hours and Wage".to_string()
            }
            ExtractionError::InputTooLong { .. } => {
                "Shorten the payroll entry and resubmit".to_string()
            }
            _ => match error.field() {
                Some(field) => format!("Check the '{}' field of the payroll entry", field),
                None => "Check the payroll entry and resubmit".to_string(),
            },
        };
        Self::with_details("EXTRACTION_ERROR", error.to_string(), details)
    }

    /// Creates an error for a well-formed request with unusable contents.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new("INVALID_REQUEST", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }

    /// Creates an internal error response. Never carries internal details.
    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", "An internal error occurred")
    }
}

/// Error envelope returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always `false`.
    pub success: bool,
    /// The error.
    pub error: ApiError,
}

/// API error with HTTP status code.
#[derive(Debug)]
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl ApiErrorResponse {
    /// Creates a `400 Bad Request` response.
    pub fn bad_request(error: ApiError) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
        }
    }
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            success: false,
            error: self.error,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<EngineError> for ApiError {
    fn from(error: EngineError) -> Self {
        ApiErrorResponse::from(error).error
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::Extraction(err) => Self::bad_request(ApiError::extraction(&err)),
            EngineError::ConfigNotFound { .. }
            | EngineError::ConfigParseError { .. }
            | EngineError::InvalidConfig { .. }
            | EngineError::Internal { .. } => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::internal(),
            },
        }
    }
}
