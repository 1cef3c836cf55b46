//! Data models for Biblend

pub mod book;
pub mod category;
pub mod lendbook;
pub mod user;

// Re-export commonly used types
pub use book::{Book, CreateBook, UpdateBook};
pub use category::{Category, CreateCategory, UpdateCategory};
pub use lendbook::{CreateLendbook, Lendbook, UpdateLendbook};
pub use user::{CreateUser, UpdateUser, User};

use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Parse a textual identifier into a UUID
pub fn parse_id(value: &str) -> AppResult<Uuid> {
    Uuid::try_parse(value).map_err(|_| AppError::InvalidId(value.to_string()))
}
