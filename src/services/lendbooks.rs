//! Loan (lendbook) management service
//!
//! Validation runs in a fixed order: referenced book, then referenced
//! user, then the busy check. A book is busy while any non-deleted
//! lendbook references it; on update the record being saved is excluded
//! from its own busy check, so re-saving a loan with an unchanged book
//! does not conflict with itself.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::lendbook::{CreateLendbook, Lendbook, UpdateLendbook},
    repository::{BookStore, LendbookStore, UserStore},
};

#[derive(Clone)]
pub struct LendbooksService {
    lendbooks: Arc<dyn LendbookStore>,
    books: Arc<dyn BookStore>,
    users: Arc<dyn UserStore>,
}

impl LendbooksService {
    pub fn new(
        lendbooks: Arc<dyn LendbookStore>,
        books: Arc<dyn BookStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self { lendbooks, books, users }
    }

    /// Lend a book to a user
    pub async fn create(&self, input: CreateLendbook) -> AppResult<Lendbook> {
        self.check_references(input.book_id, input.user_id).await?;
        self.check_book_free(input.book_id, None).await?;
        self.lendbooks.create(&input).await
    }

    /// Overwrite the book and user of an existing loan
    pub async fn update(&self, input: UpdateLendbook) -> AppResult<Lendbook> {
        if self.lendbooks.find_by_id(input.id).await?.is_none() {
            return Err(AppError::NotFound(format!("lendbook {} not found", input.id)));
        }
        self.check_references(input.book_id, input.user_id).await?;
        self.check_book_free(input.book_id, Some(input.id)).await?;
        self.lendbooks
            .update(&input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("lendbook {} not found", input.id)))
    }

    /// Get a loan by ID
    pub async fn find(&self, id: Uuid) -> AppResult<Lendbook> {
        self.lendbooks
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("lendbook {} not found", id)))
    }

    /// Get every non-deleted loan
    pub async fn find_all(&self) -> AppResult<Vec<Lendbook>> {
        self.lendbooks.find_all().await
    }

    /// Soft-delete a loan by ID, freeing the book for lending again
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.lendbooks.soft_delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("lendbook {} not found", id)))
        }
    }

    /// Referenced book before referenced user
    async fn check_references(&self, book_id: Uuid, user_id: Uuid) -> AppResult<()> {
        if !self.books.exists(book_id).await? {
            return Err(AppError::BookNotFound);
        }
        if !self.users.exists(user_id).await? {
            return Err(AppError::UserNotFound);
        }
        Ok(())
    }

    /// Early-fail busy check. The partial unique index on active loans is
    /// the authoritative guard when two writers race past this probe.
    async fn check_book_free(&self, book_id: Uuid, exclude: Option<Uuid>) -> AppResult<()> {
        if let Some(active) = self.lendbooks.active_loan_for_book(book_id, exclude).await? {
            tracing::debug!(%book_id, lendbook_id = %active.id, "book already has an active loan");
            return Err(AppError::BookBusy);
        }
        Ok(())
    }
}
