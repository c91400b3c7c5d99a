//! HTTP API module for the WCP compliance engine.
//!
//! This module provides the REST API endpoints for evaluating certified
//! payroll entries and reporting service health.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{AnalyzeRequest, BatchAnalyzeRequest, MAX_BATCH_SIZE};
pub use response::{
    AnalyzeResponse, ApiError, ApiErrorResponse, BatchAnalyzeResponse, BatchItem, BatchResult,
    ErrorBody, HealthResponse,
};
pub use state::AppState;
