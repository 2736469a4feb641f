//! Error types module
//!
//! All request-level failures are unified under the `AppError` enum, which
//! carries the HTTP status and log level the API layer uses when rendering
//! and reporting the error.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Server configuration error: {0}")]
    ServerConfig(String),

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status code to return
    pub fn http_status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::Unauthorized(_) => 401,
            AppError::MethodNotAllowed => 405,
            AppError::ServerConfig(_) => 500,
            AppError::Upstream(_) => 500,
            AppError::Internal(_) => 500,
        }
    }

    /// Get the error type name for structured logging
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::MethodNotAllowed => "MethodNotAllowed",
            AppError::ServerConfig(_) => "ServerConfig",
            AppError::Upstream(_) => "Upstream",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Log level for this error: client mistakes at debug, every 500-class
    /// failure at error so operators see the full upstream diagnostic.
    pub fn log_level(&self) -> LogLevel {
        match self {
            AppError::InvalidInput(_) => LogLevel::Debug,
            AppError::Unauthorized(_) => LogLevel::Debug,
            AppError::MethodNotAllowed => LogLevel::Debug,
            AppError::ServerConfig(_) => LogLevel::Error,
            AppError::Upstream(_) => LogLevel::Error,
            AppError::Internal(_) => LogLevel::Error,
        }
    }

    /// Client-facing message. Nothing is redacted: upstream diagnostic text
    /// is passed through for the small, trusted audience this serves.
    pub fn client_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed => "Method not allowed".to_string(),
            AppError::InvalidInput(msg)
            | AppError::Unauthorized(msg)
            | AppError::ServerConfig(msg)
            | AppError::Upstream(msg)
            | AppError::Internal(msg) => msg.clone(),
        }
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(AppError::InvalidInput("x".into()).http_status_code(), 400);
        assert_eq!(AppError::Unauthorized("x".into()).http_status_code(), 401);
        assert_eq!(AppError::MethodNotAllowed.http_status_code(), 405);
        assert_eq!(AppError::ServerConfig("x".into()).http_status_code(), 500);
        assert_eq!(AppError::Upstream("x".into()).http_status_code(), 500);
    }

    #[test]
    fn test_client_message_passthrough() {
        let err = AppError::Upstream("token issue: {\"error\":\"x\"}".to_string());
        assert_eq!(err.client_message(), "token issue: {\"error\":\"x\"}");
        assert_eq!(AppError::MethodNotAllowed.client_message(), "Method not allowed");
    }

    #[test]
    fn test_log_levels() {
        assert_eq!(AppError::InvalidInput("x".into()).log_level(), LogLevel::Debug);
        assert_eq!(AppError::Upstream("x".into()).log_level(), LogLevel::Error);
        assert_eq!(AppError::ServerConfig("x".into()).log_level(), LogLevel::Error);
    }
}
