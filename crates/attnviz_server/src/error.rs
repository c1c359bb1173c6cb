//! Transport-level error mapping.
//!
//! # Invariants
//! - Every failure renders as a plain-text body with a 4xx/5xx status.
//! - Store failures expose the underlying error text.

use attnviz_core::TextServiceError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Error returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Request body or path segment could not be decoded.
    Decode(String),
    /// Text service rejected or failed the operation.
    Service(TextServiceError),
    /// Failure outside the service, e.g. a crashed blocking task.
    Internal(String),
}

impl ApiError {
    /// Maps this error to the HTTP status returned to the client.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Decode(_) => StatusCode::BAD_REQUEST,
            Self::Service(TextServiceError::Validation(_)) => StatusCode::BAD_REQUEST,
            Self::Service(TextServiceError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Service(TextServiceError::Repo(_))
            | Self::Service(TextServiceError::InconsistentState(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode(message) => write!(f, "invalid request: {message}"),
            Self::Service(err) => write!(f, "{err}"),
            Self::Internal(message) => write!(f, "internal error: {message}"),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Service(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TextServiceError> for ApiError {
    fn from(value: TextServiceError) -> Self {
        Self::Service(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            warn!(
                "event=api_error module=api status=error http_status={} error={}",
                status.as_u16(),
                self
            );
        }
        (status, self.to_string()).into_response()
    }
}
