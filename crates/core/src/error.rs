//! Unified error types for mcp-docqa.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error types for the mcp-docqa server.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty query, malformed document id).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// No document with the given id exists.
    #[error("DOCUMENT_NOT_FOUND: {0}")]
    DocumentNotFound(String),

    /// Database operation failed.
    #[error("STORE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// A stored or generated payload could not be (de)serialized.
    #[error("SERIALIZE_FAILED: {0}")]
    Serialization(String),

    /// Gemini API authentication error.
    #[error("GEMINI_AUTH_ERROR: {0}")]
    GeminiAuth(String),

    /// Gemini API rate limited.
    #[error("GEMINI_RATE_LIMITED: {0}")]
    GeminiRateLimited(String),

    /// Gemini refused to answer (safety block).
    #[error("GEMINI_BLOCKED: {0}")]
    GeminiBlocked(String),

    /// Answer generation failed.
    #[error("GENERATION_FAILED: {0}")]
    Generation(String),
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::DocumentNotFound(msg) => (-32001, msg.clone()),
            Error::Database(e) => (-32002, e.to_string()),
            Error::Serialization(msg) => (-32003, msg.clone()),
            Error::Generation(msg) => (-32008, msg.clone()),
            Error::GeminiAuth(msg) => (-32009, msg.clone()),
            Error::GeminiRateLimited(msg) => (-32010, msg.clone()),
            Error::GeminiBlocked(msg) => (-32011, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DocumentNotFound("doc-42".to_string());
        assert!(err.to_string().contains("DOCUMENT_NOT_FOUND"));
        assert!(err.to_string().contains("doc-42"));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::DocumentNotFound("doc-42".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);
    }

    #[test]
    fn test_invalid_input_uses_standard_code() {
        let err = Error::InvalidInput("query cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);
    }
}
