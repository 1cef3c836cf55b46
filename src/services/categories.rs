//! Category management service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::category::{Category, CreateCategory, UpdateCategory},
    repository::CategoryStore,
};

#[derive(Clone)]
pub struct CategoriesService {
    categories: Arc<dyn CategoryStore>,
}

impl CategoriesService {
    pub fn new(categories: Arc<dyn CategoryStore>) -> Self {
        Self { categories }
    }

    /// Create a new category
    pub async fn create(&self, input: CreateCategory) -> AppResult<Category> {
        self.categories.create(&input).await
    }

    /// Overwrite the updatable fields of an existing category
    pub async fn update(&self, input: UpdateCategory) -> AppResult<Category> {
        self.categories
            .update(&input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category {} not found", input.id)))
    }

    /// Get a category by ID
    pub async fn find(&self, id: Uuid) -> AppResult<Category> {
        self.categories
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("category {} not found", id)))
    }

    /// Get every non-deleted category
    pub async fn find_all(&self) -> AppResult<Vec<Category>> {
        self.categories.find_all().await
    }

    /// Soft-delete a category by ID
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.categories.soft_delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("category {} not found", id)))
        }
    }
}
