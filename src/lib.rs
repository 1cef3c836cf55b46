//! Biblend - library book lending service layer
//!
//! CRUD services for the Category, Book, User and Lendbook records of a
//! library lending application, backed by PostgreSQL. The lendbook service
//! enforces referential checks and the one-active-loan-per-book rule;
//! transport and bootstrap belong to the embedding application.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
