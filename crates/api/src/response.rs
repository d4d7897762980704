//! JSON output shapes.
//!
//! One explicit DTO per entity; `password_hash` never appears in any of
//! them.

use booknook_db::entities::{book, content_report, reading_list, review, user};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use booknook_core::ListBookEntry;

/// Plain `{"message": ...}` body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// User as serialized to clients.
#[derive(Debug, Clone, Serialize)]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<FixedOffset>,
}

impl From<user::Model> for UserDto {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            created_at: model.created_at,
        }
    }
}

/// The compact user shape embedded in auth responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserSummary {
    pub id: String,
    pub username: String,
}

impl From<&user::Model> for UserSummary {
    fn from(model: &user::Model) -> Self {
        Self {
            id: model.id.clone(),
            username: model.username.clone(),
        }
    }
}

/// Book as serialized to clients.
#[derive(Debug, Clone, Serialize)]
pub struct BookDto {
    pub id: String,
    pub title: String,
    pub author: String,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub page_count: Option<i32>,
    pub publication_year: Option<i32>,
    pub image_url: Option<String>,
    pub pdf_url: Option<String>,
    pub is_pdf: bool,
    pub file_size: Option<i64>,
    pub upload_date: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
}

impl From<book::Model> for BookDto {
    fn from(model: book::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            author: model.author,
            genre: model.genre,
            description: model.description,
            page_count: model.page_count,
            publication_year: model.publication_year,
            image_url: model.image_url,
            pdf_url: model.pdf_url,
            is_pdf: model.is_pdf,
            file_size: model.file_size,
            upload_date: model.upload_date,
            created_at: model.created_at,
        }
    }
}

/// Review as serialized to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDto {
    pub id: String,
    pub user_id: String,
    pub book_id: String,
    pub review_text: String,
    pub rating: i32,
    pub created_at: DateTime<FixedOffset>,
}

impl From<review::Model> for ReviewDto {
    fn from(model: review::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            book_id: model.book_id,
            review_text: model.review_text,
            rating: model.rating,
            created_at: model.created_at,
        }
    }
}

/// A book within a reading list, with the per-list annotation.
#[derive(Debug, Clone, Serialize)]
pub struct ListBookDto {
    #[serde(flatten)]
    pub book: BookDto,
    pub note: Option<String>,
    pub list_rating: Option<i32>,
}

impl From<ListBookEntry> for ListBookDto {
    fn from(entry: ListBookEntry) -> Self {
        Self {
            book: entry.book.into(),
            note: entry.member.note,
            list_rating: entry.member.rating,
        }
    }
}

/// Reading list with its books.
#[derive(Debug, Clone, Serialize)]
pub struct ReadingListDto {
    pub id: String,
    pub name: String,
    pub user_id: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: Option<DateTime<FixedOffset>>,
    pub books: Vec<ListBookDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserSummary>,
}

impl ReadingListDto {
    #[must_use]
    pub fn new(
        list: reading_list::Model,
        entries: Vec<ListBookEntry>,
        user: Option<UserSummary>,
    ) -> Self {
        Self {
            id: list.id,
            name: list.name,
            user_id: list.user_id,
            created_at: list.created_at,
            updated_at: list.updated_at,
            books: entries.into_iter().map(Into::into).collect(),
            user,
        }
    }
}

/// Content report acknowledgement.
#[derive(Debug, Serialize)]
pub struct ReportAck {
    pub success: bool,
    pub message: String,
}

impl ReportAck {
    #[must_use]
    pub fn submitted(_report: &content_report::Model) -> Self {
        Self {
            success: true,
            message: "Report submitted successfully".to_string(),
        }
    }
}
