//! Business logic services

pub mod books;
pub mod categories;
pub mod lendbooks;
pub mod users;

use std::sync::Arc;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub categories: categories::CategoriesService,
    pub books: books::BooksService,
    pub users: users::UsersService,
    pub lendbooks: lendbooks::LendbooksService,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let categories = Arc::new(repository.categories);
        let books = Arc::new(repository.books);
        let users = Arc::new(repository.users);
        let lendbooks = Arc::new(repository.lendbooks);

        Self {
            categories: categories::CategoriesService::new(categories.clone()),
            books: books::BooksService::new(books.clone(), categories),
            users: users::UsersService::new(users.clone()),
            lendbooks: lendbooks::LendbooksService::new(lendbooks, books, users),
        }
    }
}
