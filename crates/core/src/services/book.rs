//! Book service.

use booknook_common::{AppResult, IdGenerator};
use booknook_db::{entities::book, repositories::BookRepository};
use sea_orm::Set;
use serde::Deserialize;
use validator::Validate;

use crate::validate;

/// Book service for catalog CRUD.
#[derive(Clone)]
pub struct BookService {
    book_repo: BookRepository,
    id_gen: IdGenerator,
}

/// Input for creating a book record (not an upload; see the ingestion
/// service for PDFs).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    #[validate(length(max = 100))]
    pub genre: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1))]
    pub page_count: Option<i32>,
    #[validate(range(min = 0))]
    pub publication_year: Option<i32>,
    pub image_url: Option<String>,
}

impl BookService {
    /// Create a new book service.
    #[must_use]
    pub const fn new(book_repo: BookRepository) -> Self {
        Self {
            book_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new book record.
    pub async fn create(&self, input: CreateBookInput) -> AppResult<book::Model> {
        input.validate()?;
        validate::book_title(&input.title)?;
        validate::book_author(&input.author)?;
        if let Some(ref g) = input.genre {
            validate::genre(g)?;
        }
        if let Some(pages) = input.page_count {
            validate::page_count(pages)?;
        }
        if let Some(year) = input.publication_year {
            validate::publication_year(year)?;
        }

        let model = book::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(input.title.trim().to_string()),
            author: Set(input.author.trim().to_string()),
            genre: Set(input.genre),
            description: Set(input.description),
            page_count: Set(input.page_count),
            publication_year: Set(input.publication_year),
            image_url: Set(input.image_url),
            is_pdf: Set(false),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };

        self.book_repo.create(model).await
    }

    /// Get a book by ID.
    pub async fn get(&self, id: &str) -> AppResult<book::Model> {
        self.book_repo.get_by_id(id).await
    }

    /// Get all books.
    pub async fn list(&self) -> AppResult<Vec<book::Model>> {
        self.book_repo.find_all().await
    }
}
