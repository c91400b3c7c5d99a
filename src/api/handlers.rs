//! HTTP request handlers for the WCP compliance API.
//!
//! This module contains the handler functions for all API endpoints.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{DecisionStats, ExtractedRecord};

use super::request::{AnalyzeRequest, BatchAnalyzeRequest, MAX_BATCH_SIZE};
use super::response::{
    AnalyzeResponse, ApiError, ApiErrorResponse, BatchAnalyzeResponse, BatchItem, BatchResult,
    HealthResponse,
};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/analyze", post(analyze_handler))
        .route("/analyze/batch", post(batch_handler))
        .route("/validate", post(validate_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}

/// Handler for POST /analyze.
///
/// Extracts, validates and explains a raw payroll entry.
async fn analyze_handler(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing analyze request");

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    let budget = engine.budget().limited_to(request.max_steps);
    match engine.evaluate_with_budget(&request.content, budget).await {
        Ok(decision) => {
            info!(
                correlation_id = %correlation_id,
                decision_id = %decision.decision_id,
                status = %decision.status,
                findings = decision.findings.len(),
                cycle_time_ms = decision.health.cycle_time_ms,
                "Analyze request completed"
            );
            (StatusCode::OK, Json(AnalyzeResponse::new(decision))).into_response()
        }
        Err(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                client_error = err.is_client_error(),
                "Analyze request failed"
            );
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /analyze/batch.
///
/// Evaluates every entry independently; one bad entry does not fail the
/// request.
async fn batch_handler(
    State(state): State<AppState>,
    payload: Result<Json<BatchAnalyzeRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    info!(
        correlation_id = %correlation_id,
        count = request.requests.len(),
        "Processing batch analyze request"
    );

    if request.requests.is_empty() || request.requests.len() > MAX_BATCH_SIZE {
        warn!(
            correlation_id = %correlation_id,
            count = request.requests.len(),
            "Batch size out of range"
        );
        return ApiErrorResponse::bad_request(ApiError::invalid_request(format!(
            "requests must contain between 1 and {} entries",
            MAX_BATCH_SIZE
        )))
        .into_response();
    }

    let engine = state.engine();
    let contents: Vec<String> = request.requests.iter().map(|r| r.content.clone()).collect();
    let outcomes = engine
        .evaluate_batch(
            request
                .requests
                .into_iter()
                .map(|r| (r.content, engine.budget().limited_to(r.max_steps))),
        )
        .await;

    let results: Vec<BatchItem> = contents
        .into_iter()
        .zip(outcomes)
        .enumerate()
        .map(|(index, (content, outcome))| match outcome {
            Ok(decision) => BatchItem {
                index,
                content,
                success: true,
                data: Some(decision),
                error: None,
            },
            Err(err) => BatchItem {
                index,
                content,
                success: false,
                data: None,
                error: Some(err.into()),
            },
        })
        .collect();
    let stats = DecisionStats::from_decisions(results.iter().filter_map(|item| item.data.as_ref()));

    info!(
        correlation_id = %correlation_id,
        total = stats.total,
        failed = results.len() - stats.total,
        approved = stats.approved,
        revise = stats.revise,
        reject = stats.reject,
        "Batch analyze request completed"
    );

    let body = BatchAnalyzeResponse {
        success: true,
        data: BatchResult { results, stats },
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Handler for POST /validate.
///
/// Validates an already structured record, skipping extraction.
async fn validate_handler(
    State(state): State<AppState>,
    payload: Result<Json<ExtractedRecord>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing validate request");

    let record = match payload {
        Ok(Json(record)) => record,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };

    let engine = state.engine();
    let decision = engine.evaluate_record(record, engine.budget()).await;
    info!(
        correlation_id = %correlation_id,
        decision_id = %decision.decision_id,
        status = %decision.status,
        findings = decision.findings.len(),
        "Validate request completed"
    );
    (StatusCode::OK, Json(AnalyzeResponse::new(decision))).into_response()
}

/// Handler for GET /health.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        provider: state.engine().provider_name().to_string(),
        roles: state.roles().to_vec(),
    })
}

/// Converts a JSON extraction failure into a `400` error response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
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
            warn!(correlation_id = %correlation_id, "Missing JSON content type");
            ApiError::malformed_json("Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    ApiErrorResponse::bad_request(error).into_response()
}
