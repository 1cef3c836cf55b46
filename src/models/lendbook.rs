//! Lendbook (loan) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Lendbook model from database, one row per loan of a book to a user
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Lendbook {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create lendbook request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLendbook {
    pub book_id: Uuid,
    pub user_id: Uuid,
}

/// Update lendbook request, replaces every updatable field
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLendbook {
    pub id: Uuid,
    pub book_id: Uuid,
    pub user_id: Uuid,
}
