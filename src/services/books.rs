//! Book catalog service
//!
//! Writes go through the category existence check before touching the
//! store, so an invalid `category_id` surfaces as `CategoryNotFound`
//! rather than a raw constraint error.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::book::{Book, CreateBook, UpdateBook},
    repository::{BookStore, CategoryStore},
};

#[derive(Clone)]
pub struct BooksService {
    books: Arc<dyn BookStore>,
    categories: Arc<dyn CategoryStore>,
}

impl BooksService {
    pub fn new(books: Arc<dyn BookStore>, categories: Arc<dyn CategoryStore>) -> Self {
        Self { books, categories }
    }

    /// Create a new book in an existing category
    pub async fn create(&self, input: CreateBook) -> AppResult<Book> {
        if !self.categories.exists(input.category_id).await? {
            return Err(AppError::CategoryNotFound);
        }
        self.books.create(&input).await
    }

    /// Overwrite name, description and category of an existing book
    pub async fn update(&self, input: UpdateBook) -> AppResult<Book> {
        if self.books.find_by_id(input.id).await?.is_none() {
            return Err(AppError::NotFound(format!("book {} not found", input.id)));
        }
        if !self.categories.exists(input.category_id).await? {
            return Err(AppError::CategoryNotFound);
        }
        self.books
            .update(&input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {} not found", input.id)))
    }

    /// Get a book by ID
    pub async fn find(&self, id: Uuid) -> AppResult<Book> {
        self.books
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("book {} not found", id)))
    }

    /// Get every non-deleted book
    pub async fn find_all(&self) -> AppResult<Vec<Book>> {
        self.books.find_all().await
    }

    /// Soft-delete a book by ID
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.books.soft_delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("book {} not found", id)))
        }
    }
}
