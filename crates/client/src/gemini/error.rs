//! Gemini API client error types.

use std::sync::Arc;

/// Errors from the Gemini generateContent client.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// Missing GEMINI_API_KEY environment variable.
    #[error("missing API key: GEMINI_API_KEY not set")]
    MissingApiKey,

    /// Unknown model name or alias.
    #[error("unknown model: {0} (expected flash or pro)")]
    InvalidModel(String),

    /// Invalid generation request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Authentication failed (invalid API key).
    #[error("authentication failed: invalid API key")]
    AuthError,

    /// Rate limited by the Gemini API.
    #[error("rate limited: too many requests")]
    RateLimited,

    /// The model refused to answer (safety block).
    #[error("generation blocked: {0}")]
    Blocked(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for GeminiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { GeminiError::Timeout } else { GeminiError::Network(Arc::new(err)) }
    }
}

impl From<GeminiError> for docqa_core::Error {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::InvalidModel(_) | GeminiError::InvalidRequest(_) => {
                docqa_core::Error::InvalidInput(err.to_string())
            }
            GeminiError::MissingApiKey | GeminiError::AuthError => docqa_core::Error::GeminiAuth(err.to_string()),
            GeminiError::RateLimited => docqa_core::Error::GeminiRateLimited(err.to_string()),
            GeminiError::Blocked(reason) => docqa_core::Error::GeminiBlocked(reason),
            GeminiError::HttpError { .. }
            | GeminiError::Timeout
            | GeminiError::Network(_)
            | GeminiError::Parse(_) => docqa_core::Error::Generation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeminiError::MissingApiKey;
        assert!(err.to_string().contains("API key"));

        let err = GeminiError::InvalidModel("gpt-4".to_string());
        assert!(err.to_string().contains("unknown model"));
    }

    #[test]
    fn test_maps_to_core_auth_error() {
        let core_err: docqa_core::Error = GeminiError::AuthError.into();
        assert!(matches!(core_err, docqa_core::Error::GeminiAuth(_)));
    }

    #[test]
    fn test_maps_blocked_to_core_blocked() {
        let core_err: docqa_core::Error = GeminiError::Blocked("SAFETY".to_string()).into();
        assert!(matches!(core_err, docqa_core::Error::GeminiBlocked(_)));
    }

    #[test]
    fn test_maps_invalid_model_to_invalid_input() {
        let core_err: docqa_core::Error = GeminiError::InvalidModel("gpt-4".to_string()).into();
        assert!(matches!(core_err, docqa_core::Error::InvalidInput(_)));
    }
}
