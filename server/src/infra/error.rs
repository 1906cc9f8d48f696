use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use destination_relay::error::{ForwardError, StoreError};
use serde_json::json;
use std::fmt;
use tracing::{error, info};

#[derive(Debug)]
pub struct AppError {
    pub status_code: StatusCode,
    pub cause: String,
    pub message: Option<String>,
}

impl AppError {
    pub fn new(
        cause: &str,
        message: &str,
    ) -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            cause: cause.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn bad_request(message: &str) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            cause: message.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn unauthorized(message: &str) -> Self {
        Self {
            status_code: StatusCode::UNAUTHORIZED,
            cause: message.to_string(),
            message: Some(message.to_string()),
        }
    }

    pub fn not_found(message: &str) -> Self {
        Self {
            status_code: StatusCode::NOT_FOUND,
            cause: message.to_string(),
            message: Some(message.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.message.clone().unwrap_or(self.cause.clone()),
        }));

        if self.status_code.is_server_error() {
            error!(self.cause);
        } else if self.status_code.is_client_error() {
            info!(self.cause);
        }

        (self.status_code, body).into_response()
    }
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.cause)
    }
}

impl From<JsonRejection> for AppError {
    fn from(inner: JsonRejection) -> Self {
        Self {
            status_code: inner.status(),
            cause: inner.to_string(),
            message: Some(inner.body_text()),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(inner: StoreError) -> Self {
        match &inner {
            StoreError::Validation(message) => Self::bad_request(message),
            StoreError::NotFound => Self::not_found(&inner.to_string()),
            // Persistence details stay in the log, the client sees a generic
            // message.
            StoreError::Persistence(cause) => Self {
                status_code: StatusCode::BAD_REQUEST,
                cause: cause.clone(),
                message: Some("Error while saving destination".to_string()),
            },
        }
    }
}

impl From<ForwardError> for AppError {
    fn from(inner: ForwardError) -> Self {
        let message = inner.to_string();
        let status_code = match &inner {
            ForwardError::Unauthorized(_) | ForwardError::UnsupportedMethod(_) => StatusCode::BAD_REQUEST,
            ForwardError::Unreachable(_) | ForwardError::UpstreamStatus { .. } | ForwardError::InvalidResponseBody(_) => StatusCode::BAD_GATEWAY,
            ForwardError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        Self {
            status_code,
            cause: message.clone(),
            message: Some(message),
        }
    }
}
