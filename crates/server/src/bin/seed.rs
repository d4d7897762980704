//! Seed binary: reset the schema and load the fixture data set.
//!
//! Run with `cargo run --bin seed`. Drops all application data first.

use std::sync::Arc;

use booknook_common::Config;
use booknook_core::{
    BookService, CreateBookInput, CreateReviewInput, ReviewService, SearchService, UserService,
};
use booknook_db::repositories::{BookRepository, ReviewRepository, UserRepository};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "booknook=info".into()),
        )
        .init();

    let config = Config::load()?;
    let db = booknook_db::init(&config).await?;

    info!("Resetting database schema...");
    booknook_db::reset(&db).await?;

    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let book_repo = BookRepository::new(Arc::clone(&db));
    let review_repo = ReviewRepository::new(Arc::clone(&db));

    let user_service = UserService::new(user_repo.clone());
    let book_service = BookService::new(book_repo.clone());
    let review_service = ReviewService::new(review_repo, user_repo, book_repo.clone());
    let search_service = SearchService::new(book_repo);

    info!("Creating users...");
    let ian = user_service.create("test_user_ian", "kabaka_ian").await?;
    let john = user_service.create("test_user_john", "doe_john").await?;

    info!("Creating books...");
    let rational_male = book_service
        .create(CreateBookInput {
            title: "Rational Male".to_string(),
            author: "Rollo Tomassi".to_string(),
            genre: Some("non fiction".to_string()),
            description: Some("an interesting book".to_string()),
            page_count: Some(384),
            publication_year: Some(2013),
            image_url: Some("https://cdnattic.atticbooks.co.ke/img/N462777.jpg".to_string()),
        })
        .await?;
    let laws_of_power = book_service
        .create(CreateBookInput {
            title: "48 laws of power".to_string(),
            author: "Robert Greene".to_string(),
            genre: Some("Non-Fiction".to_string()),
            description: Some("Another great book.".to_string()),
            page_count: Some(150),
            publication_year: Some(2018),
            image_url: Some("https://atticbooks.co.ke/books/the-48-laws-of-power".to_string()),
        })
        .await?;

    info!("Creating reviews...");
    review_service
        .create(CreateReviewInput {
            user_id: Some(ian.id),
            book_id: Some(rational_male.id),
            review_text: Some("Great book!".to_string()),
            rating: Some(5),
        })
        .await?;
    review_service
        .create(CreateReviewInput {
            user_id: Some(john.id),
            book_id: Some(laws_of_power.id),
            review_text: Some("Not bad.".to_string()),
            rating: Some(3),
        })
        .await?;

    info!("Refreshing search index...");
    search_service.refresh_all().await?;

    info!("Database operation was a success!");
    Ok(())
}
