use std::fmt;

/// Failure of a single outbound forward call.
#[derive(Debug, Clone, PartialEq)]
pub enum ForwardError {
    Unauthorized(String),
    UnsupportedMethod(String),
    Unreachable(String),
    UpstreamStatus { status: u16, body: String },
    InvalidResponseBody(String),
    Internal(String),
}

impl std::error::Error for ForwardError {}

impl fmt::Display for ForwardError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            ForwardError::Unauthorized(message) => write!(f, "{message}"),
            ForwardError::UnsupportedMethod(method) => write!(f, "Unsupported http method: {method}"),
            ForwardError::Unreachable(cause) => write!(f, "Destination unreachable: {cause}"),
            ForwardError::UpstreamStatus { status, body } => write!(f, "Destination responded with status {status} and body {body}"),
            ForwardError::InvalidResponseBody(cause) => write!(f, "Destination response body is not valid json: {cause}"),
            ForwardError::Internal(cause) => write!(f, "{cause}"),
        }
    }
}

/// Failure of a destination store operation.
#[derive(Debug, Clone, PartialEq)]
pub enum StoreError {
    Validation(String),
    NotFound,
    Persistence(String),
}

impl std::error::Error for StoreError {}

impl fmt::Display for StoreError {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            StoreError::Validation(message) => write!(f, "{message}"),
            StoreError::NotFound => write!(f, "Destination not found"),
            StoreError::Persistence(cause) => write!(f, "{cause}"),
        }
    }
}
