use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::sink::SinkError;

pub const MSG_SUBMITTED: &str = "Form submitted successfully";
pub const MSG_MISSING_CONFIG: &str = "Missing environment variables";
pub const MSG_SUBMIT_FAILED: &str = "Error submitting form";
pub const MSG_DUPLICATE: &str = "Submission already received";

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    RateLimited(u64),
    Conflict(String),
    Configuration(String),
    Upstream(SinkError),
    Internal(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            AppError::RateLimited(secs) => write!(f, "Rate Limited: retry after {secs}s"),
            AppError::Conflict(msg) => write!(f, "Conflict: {msg}"),
            AppError::Configuration(msg) => write!(f, "Configuration Error: {msg}"),
            AppError::Upstream(err) => write!(f, "Upstream Error: {err}"),
            AppError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::RateLimited(secs) => {
                let body = json!({
                    "message": format!("Too many submissions. Retry after {secs}s"),
                });
                return (
                    StatusCode::TOO_MANY_REQUESTS,
                    [("Retry-After", secs.to_string())],
                    axum::Json(body),
                )
                    .into_response();
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_MISSING_CONFIG.to_string())
            }
            AppError::Upstream(err) => {
                tracing::error!("Error submitting form: {err}");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_SUBMIT_FAILED.to_string())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, MSG_SUBMIT_FAILED.to_string())
            }
        };

        let body = json!({ "message": message });
        (status, axum::Json(body)).into_response()
    }
}

impl From<SinkError> for AppError {
    fn from(err: SinkError) -> Self {
        AppError::Upstream(err)
    }
}
