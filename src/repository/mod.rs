//! Repository layer for database operations
//!
//! Each entity gets a narrow store trait so services can be unit tested
//! against mocks, and a PostgreSQL implementation over the shared pool.

pub mod books;
pub mod categories;
pub mod lendbooks;
pub mod users;

pub use books::{BookStore, PgBooksRepository};
pub use categories::{CategoryStore, PgCategoriesRepository};
pub use lendbooks::{LendbookStore, PgLendbooksRepository};
pub use users::{PgUsersRepository, UserStore};

use sqlx::{Pool, Postgres};

/// Main repository struct holding database connection pool
#[derive(Clone)]
pub struct Repository {
    pub pool: Pool<Postgres>,
    pub categories: PgCategoriesRepository,
    pub books: PgBooksRepository,
    pub users: PgUsersRepository,
    pub lendbooks: PgLendbooksRepository,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            categories: PgCategoriesRepository::new(pool.clone()),
            books: PgBooksRepository::new(pool.clone()),
            users: PgUsersRepository::new(pool.clone()),
            lendbooks: PgLendbooksRepository::new(pool.clone()),
            pool,
        }
    }
}
