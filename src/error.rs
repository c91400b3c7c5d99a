//! Error types for the WCP compliance engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate.
//! Extraction failures are client faults, provider failures are isolated to
//! explanation authoring, and everything else is reported as an engine error.

use thiserror::Error;

/// An error raised while extracting fields from a raw payroll entry.
///
/// Every variant names the offending field so the caller can correct the
/// submission.
///
/// # Example
///
/// ```
/// use wcp_compliance::error::ExtractionError;
///
/// let error = ExtractionError::MissingField { field: "hours" };
/// assert_eq!(error.to_string(), "Missing field 'hours' in payroll entry");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    /// A labeled field could not be located in the text.
    #[error("Missing field '{field}' in payroll entry")]
    MissingField {
        /// The field that was not found.
        field: &'static str,
    },

    /// A numeric field held a value that is not a number.
    #[error("Field '{field}' has non-numeric value '{value}'")]
    NonNumeric {
        /// The field that could not be parsed.
        field: &'static str,
        /// The raw value found in the text.
        value: String,
    },

    /// A numeric field was outside its permitted bounds.
    #[error("Field '{field}' value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange {
        /// The field that was out of range.
        field: &'static str,
        /// The parsed value.
        value: String,
        /// The inclusive lower bound.
        min: String,
        /// The inclusive upper bound.
        max: String,
    },

    /// The payroll entry was shorter than the minimum accepted length.
    #[error("Payroll entry is {length} characters long; the minimum is {min}")]
    InputTooShort {
        /// The length of the submitted text.
        length: usize,
        /// The minimum accepted length.
        min: usize,
    },

    /// The payroll entry exceeded the maximum accepted length.
    #[error("Payroll entry is {length} characters long; the maximum is {max}")]
    InputTooLong {
        /// The length of the submitted text.
        length: usize,
        /// The maximum accepted length.
        max: usize,
    },
}

impl ExtractionError {
    /// Returns the name of the field this error refers to, if any.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ExtractionError::MissingField { field }
            | ExtractionError::NonNumeric { field, .. }
            | ExtractionError::OutOfRange { field, .. } => Some(field),
            ExtractionError::InputTooShort { .. } | ExtractionError::InputTooLong { .. } => None,
        }
    }
}

/// An error raised by an explanation provider.
///
/// These never abort an evaluation; the engine falls back to the
/// deterministic template when one occurs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider did not answer within the configured timeout.
    #[error("Explanation provider timed out after {timeout_ms}ms")]
    Timeout {
        /// The timeout that elapsed, in milliseconds.
        timeout_ms: u64,
    },

    /// The provider rejected the request due to rate limiting.
    #[error("Explanation provider rate limited the request")]
    RateLimited,

    /// The provider account has no remaining quota.
    #[error("Explanation provider quota exhausted")]
    QuotaExceeded,

    /// The request could not be delivered.
    #[error("Network error contacting explanation provider: {0}")]
    Network(String),

    /// The provider answered with a non-success status.
    #[error("Explanation provider returned HTTP {status}: {message}")]
    Upstream {
        /// The HTTP status code.
        status: u16,
        /// The response body or reason.
        message: String,
    },

    /// The provider answered with a body that could not be used.
    #[error("Explanation provider returned an invalid response: {0}")]
    InvalidResponse(String),

    /// No provider is configured for this request.
    #[error("Explanation provider unavailable: {0}")]
    Unavailable(String),
}

/// The main error type for the WCP compliance engine.
///
/// # Example
///
/// ```
/// use wcp_compliance::error::{EngineError, ExtractionError};
///
/// let error: EngineError = ExtractionError::MissingField { field: "role" }.into();
/// assert!(error.is_client_error());
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The payroll entry could not be parsed.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the problem.
        message: String,
    },

    /// Any unexpected failure.
    #[error("Internal error: {message}")]
    Internal {
        /// A description of the failure. Not exposed across the API boundary.
        message: String,
    },
}

impl EngineError {
    /// Returns true when the error was caused by the submitted input.
    pub fn is_client_error(&self) -> bool {
        matches!(self, EngineError::Extraction(_))
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_displays_field() {
        let error = ExtractionError::MissingField { field: "wage" };
        assert_eq!(error.to_string(), "Missing field 'wage' in payroll entry");
        assert_eq!(error.field(), Some("wage"));
    }

    #[test]
    fn test_non_numeric_displays_field_and_value() {
        let error = ExtractionError::NonNumeric {
            field: "hours",
            value: "forty".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Field 'hours' has non-numeric value 'forty'"
        );
    }

    #[test]
    fn test_out_of_range_displays_bounds() {
        let error = ExtractionError::OutOfRange {
            field: "hours",
            value: "200".to_string(),
            min: "0".to_string(),
            max: "168".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Field 'hours' value 200 is outside the allowed range [0, 168]"
        );
    }

    #[test]
    fn test_input_too_long_has_no_field() {
        let error = ExtractionError::InputTooLong {
            length: 20_000,
            max: 10_000,
        };
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_input_too_short_displays_minimum() {
        let error = ExtractionError::InputTooShort { length: 3, min: 10 };
        assert_eq!(
            error.to_string(),
            "Payroll entry is 3 characters long; the minimum is 10"
        );
        assert_eq!(error.field(), None);
    }

    #[test]
    fn test_extraction_error_is_client_error() {
        let error: EngineError = ExtractionError::MissingField { field: "role" }.into();
        assert!(error.is_client_error());
        assert_eq!(error.to_string(), "Missing field 'role' in payroll entry");
    }

    #[test]
    fn test_internal_error_is_not_client_error() {
        let error = EngineError::Internal {
            message: "task panicked".to_string(),
        };
        assert!(!error.is_client_error());
    }

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/rates.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/rates.yaml"
        );
    }

    #[test]
    fn test_provider_timeout_displays_duration() {
        let error = ProviderError::Timeout { timeout_ms: 30_000 };
        assert_eq!(
            error.to_string(),
            "Explanation provider timed out after 30000ms"
        );
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<ExtractionError>();
        assert_error::<ProviderError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn extract() -> Result<(), ExtractionError> {
            Err(ExtractionError::MissingField { field: "role" })
        }

        fn propagates_error() -> EngineResult<()> {
            extract()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::Extraction(ExtractionError::MissingField { field: "role" }))
        ));
    }
}
