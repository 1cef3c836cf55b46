//! End-to-end service tests against Postgres

use std::sync::Once;

use uuid::Uuid;

use biblend::{
    models::{
        CreateBook, CreateCategory, CreateLendbook, CreateUser, UpdateBook, UpdateLendbook,
        UpdateUser,
    },
    repository::{BookStore, LendbookStore, Repository},
    services::Services,
    AppConfig, AppError,
};

static INIT: Once = Once::new();

/// Connect, migrate and wire the full service stack. The repository is
/// returned as well so tests can drive the stores directly.
async fn setup_stack() -> (Services, Repository) {
    INIT.call_once(|| {
        dotenvy::dotenv().ok();
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init()
            .ok();
    });

    let config = AppConfig::load().expect("Failed to load configuration");
    let pool = biblend::db::connect(&config.database)
        .await
        .expect("Failed to connect to database");
    biblend::db::migrate(&pool)
        .await
        .expect("Failed to run database migrations");

    let repository = Repository::new(pool);
    (Services::new(repository.clone()), repository)
}

async fn setup() -> Services {
    setup_stack().await.0
}

async fn create_category(services: &Services, name: &str) -> Uuid {
    services
        .categories
        .create(CreateCategory { name: name.to_string() })
        .await
        .expect("Failed to create category")
        .id
}

async fn create_book(services: &Services, category_id: Uuid) -> Uuid {
    services
        .books
        .create(CreateBook {
            name: "Integration test book".to_string(),
            description: "created by the integration suite".to_string(),
            category_id,
        })
        .await
        .expect("Failed to create book")
        .id
}

async fn create_user(services: &Services) -> Uuid {
    services
        .users
        .create(CreateUser {
            name: "Test Borrower".to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
        })
        .await
        .expect("Failed to create user")
        .id
}

#[tokio::test]
#[ignore]
async fn book_create_and_find_round_trip() {
    let services = setup().await;
    let category_id = create_category(&services, "English").await;

    let created = services
        .books
        .create(CreateBook {
            name: "Create New Book 1".to_string(),
            description: "example@gmail.com".to_string(),
            category_id,
        })
        .await
        .expect("Failed to create book");

    let found = services.books.find(created.id).await.expect("Failed to find book");
    assert_eq!(found.id, created.id);
    assert_eq!(found.name, "Create New Book 1");
    assert_eq!(found.description, "example@gmail.com");
    assert_eq!(found.category_id, category_id);
    assert!(found.deleted_at.is_none());
}

#[tokio::test]
#[ignore]
async fn book_create_with_unknown_category_fails() {
    let services = setup().await;

    let err = services
        .books
        .create(CreateBook {
            name: "Orphan".to_string(),
            description: "".to_string(),
            category_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::CategoryNotFound));
}

#[tokio::test]
#[ignore]
async fn book_update_replaces_fields_and_validates_category() {
    let services = setup().await;
    let english = create_category(&services, "English").await;
    let math = create_category(&services, "Math").await;
    let book_id = create_book(&services, english).await;

    // Move to another category
    let updated = services
        .books
        .update(UpdateBook {
            id: book_id,
            name: "book Name 1".to_string(),
            description: "updated description".to_string(),
            category_id: math,
        })
        .await
        .expect("Failed to update book");
    assert_eq!(updated.category_id, math);
    assert_eq!(updated.name, "book Name 1");

    // Unknown category is rejected
    let err = services
        .books
        .update(UpdateBook {
            id: book_id,
            name: "book Name 1".to_string(),
            description: "".to_string(),
            category_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound));

    // Moving back still works
    services
        .books
        .update(UpdateBook {
            id: book_id,
            name: "book Name 1".to_string(),
            description: "".to_string(),
            category_id: english,
        })
        .await
        .expect("Failed to update book back");

    // Unknown book id is NotFound
    let err = services
        .books
        .update(UpdateBook {
            id: Uuid::new_v4(),
            name: "ghost".to_string(),
            description: "".to_string(),
            category_id: english,
        })
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[ignore]
async fn book_delete_is_soft_and_hides_the_row() {
    let services = setup().await;
    let category_id = create_category(&services, "History").await;
    let book_id = create_book(&services, category_id).await;

    services.books.delete(book_id).await.expect("Failed to delete book");

    assert!(services.books.find(book_id).await.unwrap_err().is_not_found());
    assert!(services
        .books
        .update(UpdateBook {
            id: book_id,
            name: "zombie".to_string(),
            description: "".to_string(),
            category_id,
        })
        .await
        .unwrap_err()
        .is_not_found());
    // Deleting twice is NotFound as well
    assert!(services.books.delete(book_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore]
async fn book_find_all_keeps_creation_order() {
    let services = setup().await;
    let category_id = create_category(&services, "Series").await;
    let first = create_book(&services, category_id).await;
    let second = create_book(&services, category_id).await;

    let all = services.books.find_all().await.expect("Failed to list books");
    let pos = |id| all.iter().position(|b| b.id == id).expect("book missing from find_all");
    assert!(pos(first) < pos(second));
}

#[tokio::test]
#[ignore]
async fn user_crud_round_trip() {
    let services = setup().await;
    let user_id = create_user(&services).await;

    let updated = services
        .users
        .update(UpdateUser {
            id: user_id,
            name: "Renamed Borrower".to_string(),
            email: format!("{}@example.com", Uuid::new_v4()),
        })
        .await
        .expect("Failed to update user");
    assert_eq!(updated.name, "Renamed Borrower");

    services.users.delete(user_id).await.expect("Failed to delete user");
    assert!(services.users.find(user_id).await.unwrap_err().is_not_found());
}

#[tokio::test]
#[ignore]
async fn lendbook_create_validates_references_in_order() {
    let services = setup().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let user_id = create_user(&services).await;

    // Unknown book wins over unknown user
    let err = services
        .lendbooks
        .create(CreateLendbook { book_id: Uuid::new_v4(), user_id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BookNotFound));

    let err = services
        .lendbooks
        .create(CreateLendbook { book_id, user_id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));

    let created = services
        .lendbooks
        .create(CreateLendbook { book_id, user_id })
        .await
        .expect("Failed to create lendbook");
    assert_eq!(created.book_id, book_id);
    assert_eq!(created.user_id, user_id);
}

#[tokio::test]
#[ignore]
async fn lendbook_busy_book_cannot_be_lent_twice() {
    let services = setup().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let first_borrower = create_user(&services).await;
    let second_borrower = create_user(&services).await;

    services
        .lendbooks
        .create(CreateLendbook { book_id, user_id: first_borrower })
        .await
        .expect("Failed to create first lendbook");

    let err = services
        .lendbooks
        .create(CreateLendbook { book_id, user_id: second_borrower })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BookBusy));
}

#[tokio::test]
#[ignore]
async fn lendbook_update_moves_loans_between_books() {
    let services = setup().await;
    let category_id = create_category(&services, "Novels").await;
    let book_a = create_book(&services, category_id).await;
    let book_b = create_book(&services, category_id).await;
    let user_id = create_user(&services).await;

    let loan = services
        .lendbooks
        .create(CreateLendbook { book_id: book_a, user_id })
        .await
        .expect("Failed to create lendbook");

    // B is free, so the loan can move there
    services
        .lendbooks
        .update(UpdateLendbook { id: loan.id, book_id: book_b, user_id })
        .await
        .expect("Failed to move loan to book B");

    // B is now busy for anyone else
    let other = services
        .lendbooks
        .create(CreateLendbook { book_id: book_a, user_id })
        .await
        .expect("Failed to lend the freed book A");
    let err = services
        .lendbooks
        .update(UpdateLendbook { id: other.id, book_id: book_b, user_id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BookBusy));

    // A was freed when the first loan moved off it, and the busy check
    // excludes the row being updated, so moving back is also fine once
    // the other loan is returned.
    services.lendbooks.delete(other.id).await.expect("Failed to delete loan");
    services
        .lendbooks
        .update(UpdateLendbook { id: loan.id, book_id: book_a, user_id })
        .await
        .expect("Failed to move loan back to book A");
}

#[tokio::test]
#[ignore]
async fn lendbook_resave_with_same_book_excludes_itself() {
    let services = setup().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let user_id = create_user(&services).await;
    let other_user = create_user(&services).await;

    let loan = services
        .lendbooks
        .create(CreateLendbook { book_id, user_id })
        .await
        .expect("Failed to create lendbook");

    // Same book, different borrower: only this row references the book,
    // so the update must not trip over itself.
    let updated = services
        .lendbooks
        .update(UpdateLendbook { id: loan.id, book_id, user_id: other_user })
        .await
        .expect("Failed to re-save lendbook");
    assert_eq!(updated.user_id, other_user);
}

#[tokio::test]
#[ignore]
async fn lendbook_update_rejects_unknown_references() {
    let services = setup().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let user_id = create_user(&services).await;

    let loan = services
        .lendbooks
        .create(CreateLendbook { book_id, user_id })
        .await
        .expect("Failed to create lendbook");

    let err = services
        .lendbooks
        .update(UpdateLendbook { id: Uuid::new_v4(), book_id, user_id })
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = services
        .lendbooks
        .update(UpdateLendbook { id: loan.id, book_id: Uuid::new_v4(), user_id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BookNotFound));

    let err = services
        .lendbooks
        .update(UpdateLendbook { id: loan.id, book_id, user_id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));
}

#[tokio::test]
#[ignore]
async fn lendbook_delete_frees_the_book() {
    let services = setup().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let user_id = create_user(&services).await;

    let loan = services
        .lendbooks
        .create(CreateLendbook { book_id, user_id })
        .await
        .expect("Failed to create lendbook");

    services.lendbooks.delete(loan.id).await.expect("Failed to delete lendbook");
    assert!(services.lendbooks.find(loan.id).await.unwrap_err().is_not_found());

    // The book can be lent again after the loan is retired
    services
        .lendbooks
        .create(CreateLendbook { book_id, user_id })
        .await
        .expect("Failed to lend the freed book");
}

// The tests below drive the Postgres stores directly, bypassing the
// service-level checks, so the schema constraints themselves produce the
// errors. This is the path a racing writer takes.

#[tokio::test]
#[ignore]
async fn store_busy_index_rejects_second_active_loan() {
    let (services, repository) = setup_stack().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let first_borrower = create_user(&services).await;
    let second_borrower = create_user(&services).await;

    repository
        .lendbooks
        .create(&CreateLendbook { book_id, user_id: first_borrower })
        .await
        .expect("Failed to insert first loan");

    let err = repository
        .lendbooks
        .create(&CreateLendbook { book_id, user_id: second_borrower })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BookBusy));
}

#[tokio::test]
#[ignore]
async fn store_maps_lendbook_foreign_key_violations() {
    let (services, repository) = setup_stack().await;
    let category_id = create_category(&services, "Novels").await;
    let book_id = create_book(&services, category_id).await;
    let user_id = create_user(&services).await;

    let err = repository
        .lendbooks
        .create(&CreateLendbook { book_id: Uuid::new_v4(), user_id })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::BookNotFound));

    let err = repository
        .lendbooks
        .create(&CreateLendbook { book_id, user_id: Uuid::new_v4() })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::UserNotFound));
}

#[tokio::test]
#[ignore]
async fn store_maps_book_category_foreign_key_violation() {
    let (_services, repository) = setup_stack().await;

    let err = repository
        .books
        .create(&CreateBook {
            name: "Orphan".to_string(),
            description: "".to_string(),
            category_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::CategoryNotFound));
}
