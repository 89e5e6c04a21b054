/**
 * Backend Error Types
 *
 * Every failure a handler or middleware can report. Each variant maps to
 * one HTTP status; see [`BackendError::status_code`].
 */

use axum::http::{Method, StatusCode};
use thiserror::Error;

use crate::shared::SharedError;

#[derive(Debug, Error)]
pub enum BackendError {
    /// A request-level refusal with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        status: StatusCode,
        message: String,
    },

    /// No route matched
    #[error("Route not found: {method} {path}")]
    RouteNotFound { method: Method, path: String },

    /// Unexpected server-side failure. `detail` is only shown outside
    /// production.
    #[error("Internal error: {detail}")]
    Internal { detail: String },

    /// Request body failed validation
    #[error(transparent)]
    SharedError(#[from] SharedError),
}

impl BackendError {
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::handler(StatusCode::CONFLICT, message)
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    pub fn route_not_found(method: Method, path: impl Into<String>) -> Self {
        Self::RouteNotFound {
            method,
            path: path.into(),
        }
    }

    /// # Status Code Mapping
    ///
    /// - `HandlerError` - the status it carries
    /// - `RouteNotFound` - 404
    /// - `SharedError` - 400
    /// - `Internal` - 500
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::HandlerError { status, .. } => *status,
            Self::RouteNotFound { .. } => StatusCode::NOT_FOUND,
            Self::SharedError(_) => StatusCode::BAD_REQUEST,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show any client
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            Self::RouteNotFound { method, path } => format!("Route not found: {} {}", method, path),
            Self::SharedError(err) => err.to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
        }
    }

    /// Server-side detail for faults, `None` for client errors
    pub fn fault_detail(&self) -> Option<String> {
        if !self.status_code().is_server_error() {
            return None;
        }
        match self {
            Self::Internal { detail } => Some(detail.clone()),
            other => Some(other.to_string()),
        }
    }
}
