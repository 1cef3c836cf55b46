//! Error types for the lending services

use thiserror::Error;

/// Main application error type
///
/// Referenced-entity failures are split per entity so callers can tell
/// which foreign key was invalid. Store failures are propagated unchanged.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("referenced category not found")]
    CategoryNotFound,

    #[error("referenced book not found")]
    BookNotFound,

    #[error("referenced user not found")]
    UserNotFound,

    #[error("book is already lent out")]
    BookBusy,

    #[error("invalid identifier: {0}")]
    InvalidId(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl AppError {
    /// True for the not-found class of errors (targeted row absent or
    /// soft-deleted), as opposed to invalid references or conflicts.
    pub fn is_not_found(&self) -> bool {
        matches!(self, AppError::NotFound(_))
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
