//! JSON envelopes and error mapping
//!
//! Success: `{"code": 200, "message": "...", "data": ..., "total": N}`
//! (`data` and `total` omitted when not applicable).
//! Failure: `{"error": "<operation label>", "message": "<error text>"}`.

use crate::server::commands::CommandError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::error::Error as StdError;
use tracing::{debug, error};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(message: &'static str, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data))
    }

    pub fn created(message: &'static str, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, Some(data))
    }

    fn with_status(status: StatusCode, message: &'static str, data: Option<T>) -> Self {
        Self {
            code: status.as_u16(),
            message,
            data,
            total: None,
        }
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    pub fn list(message: &'static str, data: Vec<T>) -> Self {
        let total = data.len();
        Self {
            total: Some(total),
            ..Self::ok(message, data)
        }
    }
}

impl ApiResponse<()> {
    /// Success without a payload
    pub fn message(message: &'static str) -> Self {
        Self::with_status(StatusCode::OK, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.code).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

pub const INVALID_HOST_ID: &str = "invalid host id";
pub const INVALID_REQUEST: &str = "invalid request parameters";
pub const HOST_NOT_FOUND: &str = "host not found";

/// Error returned by handlers
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: &'a str,
}

impl ApiError {
    pub fn bad_request(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
            message: message.into(),
        }
    }

    /// Classify a command failure
    ///
    /// Validation and not-found failures carry fixed labels; anything else is
    /// a 500 labelled with the operation that failed.
    pub fn from_command(operation: &'static str, err: CommandError) -> Self {
        match err {
            CommandError::ValidationFailed(msg) => Self::bad_request(INVALID_REQUEST, msg),
            CommandError::NotFound(msg) => Self {
                status: StatusCode::NOT_FOUND,
                error: HOST_NOT_FOUND,
                message: msg,
            },
            CommandError::DuplicateEntry(msg) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: operation,
                message: msg,
            },
            CommandError::Storage(e) => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: operation,
                message: error_chain(&e),
            },
        }
    }
}

/// Display an error followed by its sources, `outer: inner: root`
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(
                status = %self.status,
                error = self.error,
                message = %self.message,
                "Request failed"
            );
        } else {
            debug!(
                status = %self.status,
                error = self.error,
                message = %self.message,
                "Request rejected"
            );
        }

        let body = ErrorBody {
            error: self.error,
            message: &self.message,
        };
        (self.status, Json(body)).into_response()
    }
}
