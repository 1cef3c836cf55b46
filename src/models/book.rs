//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Book model from database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Book {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Create book request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBook {
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
}

/// Update book request, replaces every updatable field
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateBook {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub category_id: Uuid,
}
