//! Error types for Legalis
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Legalis operations
///
/// Covers configuration, account, model-call and storage failures. Storage
/// read failures are normally degraded to empty state by the history and
/// session managers and only surface here for writes that must not be lost.
#[derive(Error, Debug)]
pub enum LegalisError {
    /// Configuration-related errors (including a missing API key)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid user input (signup form, empty analysis input, bad deep link)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Bad login credentials or missing session
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// The model returned no answer text
    #[error("Empty response: {0}")]
    EmptyResponse(String),

    /// The model answer did not match the declared response schema
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider-related errors (HTTP status, transport failures)
    #[error("Provider error: {0}")]
    Provider(String),

    /// Local store errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Result type alias for Legalis operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation. Callers that
/// need to branch on the failure kind can `downcast_ref::<LegalisError>()`.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let error = LegalisError::Config("API key is missing.".to_string());
        assert_eq!(error.to_string(), "Configuration error: API key is missing.");
    }

    #[test]
    fn test_validation_error_display() {
        let error = LegalisError::Validation("Email already registered.".to_string());
        assert_eq!(
            error.to_string(),
            "Validation error: Email already registered."
        );
    }

    #[test]
    fn test_authentication_error_display() {
        let error = LegalisError::Authentication("Invalid email or password.".to_string());
        assert_eq!(
            error.to_string(),
            "Authentication error: Invalid email or password."
        );
    }

    #[test]
    fn test_empty_response_error_display() {
        let error = LegalisError::EmptyResponse("No response from AI.".to_string());
        assert_eq!(error.to_string(), "Empty response: No response from AI.");
    }

    #[test]
    fn test_parse_error_display() {
        let error = LegalisError::Parse("missing field `summary`".to_string());
        assert_eq!(error.to_string(), "Parse error: missing field `summary`");
    }

    #[test]
    fn test_storage_error_display() {
        let error = LegalisError::Storage("flush failed".to_string());
        assert_eq!(error.to_string(), "Storage error: flush failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: LegalisError = io_error.into();
        assert!(matches!(error, LegalisError::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_error = serde_json::from_str::<serde_json::Value>("{invalid json}").unwrap_err();
        let error: LegalisError = json_error.into();
        assert!(matches!(error, LegalisError::Serialization(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: : yaml").unwrap_err();
        let error: LegalisError = yaml_error.into();
        assert!(matches!(error, LegalisError::Yaml(_)));
    }

    #[test]
    fn test_downcast_through_anyhow() {
        let err: anyhow::Error = LegalisError::Authentication("nope".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<LegalisError>(),
            Some(LegalisError::Authentication(_))
        ));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<LegalisError>();
    }
}
