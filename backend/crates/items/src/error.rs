//! Item Error Types
//!
//! This module provides item-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Item-specific result type alias
pub type ItemResult<T> = Result<T, ItemError>;

/// Item-specific error variants
#[derive(Debug, Error)]
pub enum ItemError {
    /// A required creation field was missing or empty
    #[error("All fields are required.")]
    MissingFields,

    /// Malformed input (status, email, uid, multipart body, image size)
    #[error("{0}")]
    Validation(String),

    /// No item with the requested unique link
    #[error("Item not found.")]
    NotFound,

    /// Caller is neither the owner nor an admin
    #[error("You are not allowed to modify this item.")]
    Forbidden,

    /// Generated unique link collided with an existing one
    #[error("Unique link already exists")]
    LinkConflict,

    /// Image gateway upload/delete failure
    #[error("Image upload failed: {0}")]
    Upload(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ItemError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ItemError::MissingFields | ItemError::Validation(_) => StatusCode::BAD_REQUEST,
            ItemError::NotFound => StatusCode::NOT_FOUND,
            ItemError::Forbidden => StatusCode::FORBIDDEN,
            ItemError::LinkConflict => StatusCode::CONFLICT,
            ItemError::Upload(_) | ItemError::Database(_) | ItemError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            ItemError::MissingFields | ItemError::Validation(_) => ErrorKind::BadRequest,
            ItemError::NotFound => ErrorKind::NotFound,
            ItemError::Forbidden => ErrorKind::Forbidden,
            ItemError::LinkConflict => ErrorKind::Conflict,
            ItemError::Upload(_) | ItemError::Database(_) | ItemError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            ItemError::Database(e) => {
                tracing::error!(error = %e, "Item database error");
            }
            ItemError::Internal(msg) => {
                tracing::error!(message = %msg, "Item internal error");
            }
            ItemError::Upload(msg) => {
                tracing::error!(message = %msg, "Image gateway error");
            }
            ItemError::Forbidden => {
                tracing::warn!("Rejected unauthorized item mutation");
            }
            _ => {
                tracing::debug!(error = %self, "Item error");
            }
        }
    }
}

impl IntoResponse for ItemError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ItemError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => ItemError::Validation(err.message().to_string()),
            ErrorKind::NotFound => ItemError::NotFound,
            ErrorKind::Conflict => ItemError::LinkConflict,
            _ => ItemError::Internal(err.to_string()),
        }
    }
}
