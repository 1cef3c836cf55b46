//! Lendbooks repository for database operations
//!
//! The schema carries a partial unique index over active loans
//! (`lendbooks_one_active_per_book`), so the one-loan-per-book rule holds
//! even when two writers race past the service-level check. Violations of
//! that index and of the foreign keys are translated back into domain
//! errors here.

use async_trait::async_trait;
use chrono::Utc;
#[cfg(test)]
use mockall::automock;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::lendbook::{CreateLendbook, Lendbook, UpdateLendbook},
};

/// Storage boundary for lendbooks
#[cfg_attr(test, automock)]
#[async_trait]
pub trait LendbookStore: Send + Sync {
    async fn create(&self, lendbook: &CreateLendbook) -> AppResult<Lendbook>;
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Lendbook>>;
    async fn find_all(&self) -> AppResult<Vec<Lendbook>>;
    async fn update(&self, lendbook: &UpdateLendbook) -> AppResult<Option<Lendbook>>;
    async fn soft_delete(&self, id: Uuid) -> AppResult<bool>;

    /// Active (non-deleted) loan referencing the given book, if any.
    /// `exclude` skips one row, used to leave the record being updated out
    /// of its own busy check.
    async fn active_loan_for_book(
        &self,
        book_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<Lendbook>>;
}

#[derive(Clone)]
pub struct PgLendbooksRepository {
    pool: Pool<Postgres>,
}

impl PgLendbooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

/// Translate constraint violations into their domain errors
fn map_constraint(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.constraint() {
            Some("lendbooks_book_id_fkey") => return AppError::BookNotFound,
            Some("lendbooks_user_id_fkey") => return AppError::UserNotFound,
            Some("lendbooks_one_active_per_book") => return AppError::BookBusy,
            _ => {}
        }
    }
    AppError::Database(err)
}

#[async_trait]
impl LendbookStore for PgLendbooksRepository {
    async fn create(&self, lendbook: &CreateLendbook) -> AppResult<Lendbook> {
        let created = sqlx::query_as::<_, Lendbook>(
            r#"
            INSERT INTO lendbooks (id, book_id, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(lendbook.book_id)
        .bind(lendbook.user_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(map_constraint)?;

        Ok(created)
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Lendbook>> {
        let lendbook = sqlx::query_as::<_, Lendbook>(
            "SELECT * FROM lendbooks WHERE id = $1 AND deleted_at IS NULL",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lendbook)
    }

    async fn find_all(&self) -> AppResult<Vec<Lendbook>> {
        let lendbooks = sqlx::query_as::<_, Lendbook>(
            "SELECT * FROM lendbooks WHERE deleted_at IS NULL ORDER BY created_at",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(lendbooks)
    }

    async fn update(&self, lendbook: &UpdateLendbook) -> AppResult<Option<Lendbook>> {
        let updated = sqlx::query_as::<_, Lendbook>(
            r#"
            UPDATE lendbooks
            SET book_id = $2, user_id = $3, updated_at = $4
            WHERE id = $1 AND deleted_at IS NULL
            RETURNING *
            "#,
        )
        .bind(lendbook.id)
        .bind(lendbook.book_id)
        .bind(lendbook.user_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_constraint)?;

        Ok(updated)
    }

    async fn soft_delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query(
            r#"
            UPDATE lendbooks
            SET deleted_at = $2, updated_at = $2
            WHERE id = $1 AND deleted_at IS NULL
            "#,
        )
        .bind(id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn active_loan_for_book(
        &self,
        book_id: Uuid,
        exclude: Option<Uuid>,
    ) -> AppResult<Option<Lendbook>> {
        let lendbook = sqlx::query_as::<_, Lendbook>(
            r#"
            SELECT * FROM lendbooks
            WHERE book_id = $1
              AND deleted_at IS NULL
              AND ($2::uuid IS NULL OR id <> $2)
            LIMIT 1
            "#,
        )
        .bind(book_id)
        .bind(exclude)
        .fetch_optional(&self.pool)
        .await?;

        Ok(lendbook)
    }
}
