//! Unified error types for followcount.
//!
//! Every variant carries a stable code prefix in its display string and maps
//! onto a numeric MCP error code.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the followcount service.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., empty HTML).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Profile URL could not be built or parsed.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Fetch timeout.
    #[error("FETCH_TIMEOUT: {0}")]
    FetchTimeout(String),

    /// Fetch response too large.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),

    /// Connection, TLS or body read failure.
    #[error("NETWORK_ERROR: {0}")]
    Network(String),

    /// The profile page answered with a non-success status.
    #[error("HTTP_ERROR: status {status}")]
    HttpStatus { status: u16, body_snippet: String },

    /// HTTP client could not be constructed.
    #[error("CLIENT_ERROR: {0}")]
    Client(String),
}

impl Error {
    /// Short machine-readable tag reported to HTTP callers.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::InvalidInput(_) => "invalid_input",
            Error::InvalidUrl(_) => "invalid_url",
            Error::FetchTimeout(_) => "timeout",
            Error::FetchTooLarge(_) => "too_large",
            Error::Network(_) => "network_error",
            Error::HttpStatus { .. } => "http_status",
            Error::Client(_) => "client_error",
        }
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::InvalidUrl(msg) => (-32003, msg.clone()),
            Error::FetchTimeout(msg) => (-32006, msg.clone()),
            Error::FetchTooLarge(msg) => (-32007, msg.clone()),
            Error::HttpStatus { status, .. } => (-32008, format!("status {status}")),
            Error::Network(msg) => (-32009, msg.clone()),
            Error::Client(msg) => (-32000, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::HttpStatus { status: 404, body_snippet: "<html>".into() };
        assert!(err.to_string().contains("HTTP_ERROR"));
        assert!(err.to_string().contains("404"));
        assert!(!err.to_string().contains("<html>"));
    }

    #[test]
    fn test_error_kind() {
        assert_eq!(Error::Network("reset".into()).kind(), "network_error");
        assert_eq!(Error::FetchTimeout("10s".into()).kind(), "timeout");
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::InvalidInput("html cannot be empty".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32602);

        let err = Error::HttpStatus { status: 503, body_snippet: String::new() };
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32008);
        assert_eq!(mcp_err.message, "status 503");
    }
}
