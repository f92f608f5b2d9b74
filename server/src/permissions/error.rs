//! Permission Error Types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Denials raised when a permission check returns `false`.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PermissionError {
    /// Collection access requires an authenticated caller.
    #[error("Authentication required")]
    NotAuthenticated,

    /// Only the author may modify this object.
    #[error("Only the author may modify this object")]
    NotAuthor,
}

impl PermissionError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotAuthenticated => "NOT_AUTHENTICATED",
            Self::NotAuthor => "NOT_AUTHOR",
        }
    }

    /// HTTP status the denial maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotAuthor => StatusCode::FORBIDDEN,
        }
    }
}

/// Error response body for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

impl IntoResponse for PermissionError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.code().to_string(),
            message: self.to_string(),
        });

        (self.status(), body).into_response()
    }
}
