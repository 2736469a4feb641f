//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`; `AppError` and
//! `StorageError` convert into `HttpAppError` with `?` so every failure path
//! renders the same `{"ok":false,"error":…}` body with the right status and
//! gets logged consistently.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use photodrop_core::{AppError, LogLevel};
use photodrop_storage::StorageError;
use serde::Serialize;

/// Error body shape shared by every failure path.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
}

/// Wrapper type for AppError to implement IntoResponse.
/// Needed because of Rust's orphan rules: IntoResponse (external trait)
/// cannot be implemented for AppError (type from photodrop-core).
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::MissingCredentials(msg) => AppError::ServerConfig(msg),
            StorageError::TokenFetch(msg) => AppError::Upstream(format!("Token fetch failed: {msg}")),
            StorageError::UploadFailed(msg) => AppError::Upstream(format!("Upload failed: {msg}")),
        };
        HttpAppError(app)
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %error, error_type, "Request rejected");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %error, error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %error, error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(&self.0);

        let body = Json(ErrorResponse {
            ok: false,
            error: self.0.client_message(),
        });
        (status, body).into_response()
    }
}
