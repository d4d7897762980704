//! Database integration tests.
//!
//! These tests require a running `PostgreSQL` instance.
//! Run with: `cargo test --test db_integration -- --ignored`
//!
//! Environment variables:
//!   `TEST_DB_HOST` (default: localhost)
//!   `TEST_DB_PORT` (default: 5433)
//!   `TEST_DB_USER` (default: `booknook_test`)
//!   `TEST_DB_PASSWORD` (default: `booknook_test`)
//!   `TEST_DB_NAME` (default: `booknook_test`)

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use booknook_common::{AppError, IdGenerator};
use booknook_db::entities::{book, reading_list, reading_list_book, review, user};
use booknook_db::repositories::{
    BookRepository, ReadingListRepository, ReviewRepository, UserRepository,
};
use booknook_db::test_utils::{TestDatabase, TestDbConfig};
use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

fn new_id() -> String {
    IdGenerator::new().generate()
}

fn user_model(username: &str) -> user::ActiveModel {
    user::ActiveModel {
        id: Set(new_id()),
        username: Set(username.to_string()),
        password_hash: Set("$argon2id$stub".to_string()),
        created_at: Set(Utc::now().into()),
    }
}

fn book_model(title: &str, author: &str) -> book::ActiveModel {
    book::ActiveModel {
        id: Set(new_id()),
        title: Set(title.to_string()),
        author: Set(author.to_string()),
        is_pdf: Set(false),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    }
}

async fn seed_user(conn: &Arc<DatabaseConnection>, username: &str) -> user::Model {
    UserRepository::new(conn.clone())
        .create(user_model(username))
        .await
        .unwrap()
}

async fn seed_book(conn: &Arc<DatabaseConnection>, title: &str) -> book::Model {
    BookRepository::new(conn.clone())
        .create(book_model(title, "Test Author"))
        .await
        .unwrap()
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_database_connection() {
    let result = TestDatabase::new().await;
    assert!(result.is_ok(), "Failed to connect: {:?}", result.err());
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_duplicate_review_is_conflict() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();

    let user = seed_user(&conn, "reviewer").await;
    let book = seed_book(&conn, "The Pragmatic Reader").await;

    let repo = ReviewRepository::new(conn.clone());
    let make = |text: &str, rating: i32| review::ActiveModel {
        id: Set(new_id()),
        user_id: Set(user.id.clone()),
        book_id: Set(book.id.clone()),
        review_text: Set(text.to_string()),
        rating: Set(rating),
        created_at: Set(Utc::now().into()),
    };

    repo.create(make("First pass", 4)).await.unwrap();
    let second = repo.create(make("Second pass", 2)).await;

    assert!(matches!(second, Err(AppError::Conflict(_))));

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_reading_list_delete_cascades_members() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();

    let user = seed_user(&conn, "curator").await;
    let book = seed_book(&conn, "Collected Essays").await;

    let repo = ReadingListRepository::new(conn.clone());
    let list_id = new_id();
    let list = repo
        .create_with_members(
            reading_list::ActiveModel {
                id: Set(list_id.clone()),
                user_id: Set(user.id.clone()),
                name: Set("Summer".to_string()),
                created_at: Set(Utc::now().into()),
                updated_at: Set(None),
            },
            vec![reading_list_book::ActiveModel {
                id: Set(new_id()),
                reading_list_id: Set(list_id.clone()),
                book_id: Set(book.id.clone()),
                note: Set(None),
                rating: Set(None),
                created_at: Set(Utc::now().into()),
            }],
        )
        .await
        .unwrap();

    assert_eq!(repo.find_members(&list.id).await.unwrap().len(), 1);

    repo.delete(&list.id).await.unwrap();

    assert!(repo.find_by_id(&list.id).await.unwrap().is_none());
    assert!(repo.find_members(&list.id).await.unwrap().is_empty());

    db.drop_database().await.unwrap();
}

#[tokio::test]
#[ignore = "requires running PostgreSQL instance"]
async fn test_search_requires_refresh() {
    let db = TestDatabase::create_unique().await.unwrap();
    let conn = db.connection();

    let repo = BookRepository::new(conn.clone());
    repo.create(book_model("Distributed Systems", "M. Kleppmann"))
        .await
        .unwrap();

    // Unrefreshed rows have a NULL search vector and match nothing.
    let before = repo.search_fulltext("distributed", false).await.unwrap();
    assert!(before.is_empty());

    repo.refresh_search_index().await.unwrap();

    let after = repo.search_fulltext("distributed", false).await.unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].title, "Distributed Systems");

    db.drop_database().await.unwrap();
}

#[test]
fn test_config_from_env() {
    let config = TestDbConfig::default();
    assert!(!config.host.is_empty());
    assert!(config.port > 0);
    assert!(!config.username.is_empty());
    assert!(!config.database.is_empty());
}

#[test]
fn test_database_url_format() {
    let config = TestDbConfig {
        host: "testhost".to_string(),
        port: 5432,
        username: "testuser".to_string(),
        password: "testpass".to_string(),
        database: "testdb".to_string(),
    };

    let url = config.database_url();
    assert!(url.starts_with("postgres://"));
    assert!(url.contains("testhost"));
    assert!(url.contains("testdb"));
}
