// Handler outcome errors and their HTTP projection
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::JwtError;
use crate::auth::password::HashError;
use crate::database::DatabaseError;

/// Message returned to clients whenever something failed on our side.
pub const INTERNAL_ERROR_DETAIL: &str = "An internal server error occurred. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorCode {
    NotFound,
    Validation,
    Conflict,
    Unauthorized,
    Unexpected,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NotFound",
            ErrorCode::Validation => "Validation",
            ErrorCode::Conflict => "Conflict",
            ErrorCode::Unauthorized => "Unauthorized",
            ErrorCode::Unexpected => "Unexpected",
        }
    }
}

/// Failure half of every handler result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unexpected, message)
    }

    pub fn status_code(&self) -> StatusCode {
        status_for(self.code)
    }
}

/// The one place error codes become HTTP statuses.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn problem_type(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "https://tools.ietf.org/html/rfc9110#section-15.5.1",
        401 => "https://tools.ietf.org/html/rfc9110#section-15.5.2",
        404 => "https://tools.ietf.org/html/rfc9110#section-15.5.5",
        409 => "https://tools.ietf.org/html/rfc9110#section-15.5.10",
        _ => "https://tools.ietf.org/html/rfc9110#section-15.6.1",
    }
}

/// RFC 9457 problem details body.
#[derive(Debug, Serialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ProblemDetails {
    pub fn new(status: StatusCode, title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: problem_type(status),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

impl From<&AppError> for ProblemDetails {
    fn from(err: &AppError) -> Self {
        ProblemDetails::new(err.status_code(), err.code.as_str(), err.message.clone())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ProblemDetails::from(&self).into_response()
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

// Infrastructure failures are logged in full and reach the client as a generic message
impl From<DatabaseError> for AppError {
    fn from(err: DatabaseError) -> Self {
        tracing::error!("Database error: {}", err);
        AppError::unexpected(INTERNAL_ERROR_DETAIL)
    }
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        tracing::error!("Token error: {}", err);
        AppError::unexpected(INTERNAL_ERROR_DETAIL)
    }
}

impl From<HashError> for AppError {
    fn from(err: HashError) -> Self {
        tracing::error!("Password hashing error: {}", err);
        AppError::unexpected(INTERNAL_ERROR_DETAIL)
    }
}
