//! Error types for the relay LLM module

use thiserror::Error;

/// Result type alias for LLM operations
pub type Result<T> = std::result::Result<T, LLMError>;

/// LLM module errors
#[derive(Debug, Error)]
pub enum LLMError {
    /// External API call failed (non-2xx status or unreadable response)
    #[error("External API call failed: {0}")]
    ApiCallFailed(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// HTTP request error
    #[error("HTTP request error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_call_failed_display() {
        let err = LLMError::ApiCallFailed("DeepSeek API error (500): boom".to_string());
        assert_eq!(
            err.to_string(),
            "External API call failed: DeepSeek API error (500): boom"
        );
    }

    #[test]
    fn test_serde_error_conversion() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: LLMError = serde_err.into();
        assert!(matches!(err, LLMError::SerializationError(_)));
    }
}
