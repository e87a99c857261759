//! Error types and API error codes

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kinder_core::CoreError;
use serde::Serialize;
use std::any::Any;
use thiserror::Error;

/// API error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    DuplicateIdentifier,
    NotFound,
    InvalidRequest,
    ValidationFailed,
    InternalError,
}

impl ErrorCode {
    /// Get the error code string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateIdentifier => "DuplicateIdentifier",
            Self::NotFound => "NotFound",
            Self::InvalidRequest => "InvalidRequest",
            Self::ValidationFailed => "ValidationFailed",
            Self::InternalError => "InternalError",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::DuplicateIdentifier | Self::InvalidRequest => StatusCode::BAD_REQUEST,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error type
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("{}", .0.body_text())]
    Json(#[from] JsonRejection),

    #[error("{}", .0.body_text())]
    Path(#[from] PathRejection),
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Get the error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            Self::BadRequest(_) => ErrorCode::InvalidRequest,
            Self::Internal(_) => ErrorCode::InternalError,
            Self::Core(e) => match e {
                CoreError::DuplicateIdentifier(_) => ErrorCode::DuplicateIdentifier,
                CoreError::NotFound(_) => ErrorCode::NotFound,
                CoreError::InvalidRecord(_) => ErrorCode::ValidationFailed,
                CoreError::InvalidOrder(_) => ErrorCode::InvalidRequest,
            },
            Self::Json(rejection) if rejection.status() == StatusCode::UNPROCESSABLE_ENTITY => {
                ErrorCode::ValidationFailed
            }
            Self::Json(_) => ErrorCode::InvalidRequest,
            Self::Path(rejection) if rejection.status().is_server_error() => {
                ErrorCode::InternalError
            }
            Self::Path(_) => ErrorCode::InvalidRequest,
        }
    }
}

/// Render a handler panic as a 500 with the usual JSON body
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    tracing::error!(panic = %message, "handler panicked");

    ApiError::Internal("unexpected failure while handling the request".into()).into_response()
}

/// JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
    pub code: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let code = self.error_code();
        if code == ErrorCode::InternalError {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorBody {
            detail: self.to_string(),
            code: code.as_str(),
        };
        (code.status_code(), Json(body)).into_response()
    }
}
