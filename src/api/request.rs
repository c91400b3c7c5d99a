//! Request types for the WCP compliance API.

use serde::{Deserialize, Serialize};

/// Request body for the `/analyze` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzeRequest {
    /// The raw payroll entry text.
    pub content: String,
    /// Optional cap on explanation completion requests.
    ///
    /// Values above the configured maximum are lowered to it; zero is raised
    /// to one.
    #[serde(default)]
    pub max_steps: Option<u32>,
}

/// Maximum number of entries accepted by `/analyze/batch`.
pub const MAX_BATCH_SIZE: usize = 100;

/// Request body for the `/analyze/batch` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchAnalyzeRequest {
    /// Entries to evaluate, each with its own optional step cap.
    pub requests: Vec<AnalyzeRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_steps_is_optional() {
        let request: AnalyzeRequest =
            serde_json::from_str(r#"{"content": "Role: Laborer, Hours: 40, Wage: 30"}"#).unwrap();
        assert_eq!(request.max_steps, None);
    }

    #[test]
    fn test_content_is_required() {
        let result: Result<AnalyzeRequest, _> = serde_json::from_str(r#"{"max_steps": 2}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_batch_request_deserializes() {
        let request: BatchAnalyzeRequest = serde_json::from_str(
            r#"{"requests": [{"content": "a"}, {"content": "b", "max_steps": 1}]}"#,
        )
        .unwrap();
        assert_eq!(request.requests.len(), 2);
        assert_eq!(request.requests[1].max_steps, Some(1));
    }
}
