//! User (borrower) management service

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::UserStore,
};

#[derive(Clone)]
pub struct UsersService {
    users: Arc<dyn UserStore>,
}

impl UsersService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    /// Create a new user
    pub async fn create(&self, input: CreateUser) -> AppResult<User> {
        self.users.create(&input).await
    }

    /// Overwrite the updatable fields of an existing user
    pub async fn update(&self, input: UpdateUser) -> AppResult<User> {
        self.users
            .update(&input)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", input.id)))
    }

    /// Get a user by ID
    pub async fn find(&self, id: Uuid) -> AppResult<User> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", id)))
    }

    /// Get every non-deleted user
    pub async fn find_all(&self) -> AppResult<Vec<User>> {
        self.users.find_all().await
    }

    /// Soft-delete a user by ID
    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        if self.users.soft_delete(id).await? {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("user {} not found", id)))
        }
    }
}
