//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required signup/login field was missing or empty
    #[error("All fields are required")]
    MissingFields,

    /// Password and confirmation do not match
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// Email failed the shape check
    #[error("Invalid email format")]
    InvalidEmail,

    /// A user with this email already exists
    #[error("User already exists")]
    EmailTaken,

    /// No user matches the login email
    #[error("User does not exist")]
    UserNotFound,

    /// Password verification failed
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// No bearer token on a gated request
    #[error("Authentication required")]
    TokenMissing,

    /// Token malformed, tampered with, or carrying bad claims
    #[error("Invalid or expired token")]
    TokenInvalid,

    /// Token past its expiry
    #[error("Invalid or expired token")]
    TokenExpired,

    /// Password policy violation
    #[error("{0}")]
    PasswordPolicy(String),

    /// Input validation error (user name, etc.)
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::MissingFields
            | AuthError::PasswordMismatch
            | AuthError::InvalidEmail
            | AuthError::PasswordPolicy(_)
            | AuthError::Validation(_) => StatusCode::BAD_REQUEST,
            AuthError::EmailTaken => StatusCode::CONFLICT,
            AuthError::UserNotFound
            | AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingFields
            | AuthError::PasswordMismatch
            | AuthError::InvalidEmail
            | AuthError::PasswordPolicy(_)
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::UserNotFound
            | AuthError::InvalidCredentials
            | AuthError::TokenMissing
            | AuthError::TokenInvalid
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials | AuthError::UserNotFound => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::TokenInvalid | AuthError::TokenExpired => {
                tracing::warn!("Rejected bearer token");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}
