//! Application error type.
//!
//! Every operation returns `Result<T, AppError>`. An [`AppError`] carries an
//! [`ErrorKind`] (which fixes the HTTP status), the underlying error chain and
//! an optional list of [`ErrorDetail`] entries. On the wire it becomes
//! `{"message": ..., "data": [...] | null, "status": <code>}`.

use anyhow::{Error, anyhow};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;
use utoipa::ToSchema;

/// Failure classification shared by all operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    ValidationFailed,
    DuplicateUser,
    NotFound,
    InvalidCredentials,
    Unauthenticated,
    Forbidden,
    /// The request body could not be decoded at all.
    BadRequest,
    Internal,
}

impl ErrorKind {
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::ValidationFailed | ErrorKind::DuplicateUser => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            // Unknown account and wrong password answer alike.
            ErrorKind::NotFound | ErrorKind::InvalidCredentials => StatusCode::NOT_FOUND,
            ErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::ValidationFailed => "validation_failed",
            ErrorKind::DuplicateUser => "duplicate_user",
            ErrorKind::NotFound => "not_found",
            ErrorKind::InvalidCredentials => "invalid_credentials",
            ErrorKind::Unauthenticated => "unauthenticated",
            ErrorKind::Forbidden => "forbidden",
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::Internal => "internal",
        }
    }
}

/// A single structured failure entry, e.g. one rejected input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ErrorDetail {
    pub message: String,
}

impl ErrorDetail {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Error envelope returned to clients.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub message: String,
    pub data: Option<Vec<ErrorDetail>>,
    pub status: u16,
}

#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
    pub data: Vec<ErrorDetail>,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
            data: Vec::new(),
        }
    }

    /// Input rejected by the validator; `details` lists every violation.
    pub fn validation(details: Vec<ErrorDetail>) -> Self {
        Self {
            kind: ErrorKind::ValidationFailed,
            error: anyhow!("Input invalid"),
            data: details,
        }
    }

    pub fn duplicate_user<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::DuplicateUser, err)
    }

    pub fn not_found<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::NotFound, err)
    }

    pub fn invalid_credentials<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::InvalidCredentials, err)
    }

    pub fn unauthenticated<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Unauthenticated, err)
    }

    pub fn forbidden<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Forbidden, err)
    }

    pub fn bad_request<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::BadRequest, err)
    }

    pub fn internal<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Internal, err)
    }

    pub fn status(&self) -> StatusCode {
        self.kind.status()
    }

    /// Client-facing message. Internal failures never leak their cause.
    pub fn message(&self) -> String {
        match self.kind {
            ErrorKind::Internal => "Internal server error".to_string(),
            _ => self.error.to_string(),
        }
    }

    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            message: self.message(),
            data: (!self.data.is_empty()).then(|| self.data.clone()),
            status: self.status().as_u16(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind.as_str(), self.error)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.kind == ErrorKind::Internal {
            tracing::error!(error = ?self.error, "Request failed with internal error");
        }

        (self.status(), Json(self.body())).into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<Error>,
{
    fn from(err: E) -> Self {
        AppError::internal(err)
    }
}
