//! Book entity.

use sea_orm::entity::prelude::*;

/// Catalog entry: either a physical-book record or an uploaded PDF.
///
/// The searchable `tsvector` column lives next to this table but is
/// maintained entirely in SQL (see the fulltext migration and
/// `BookRepository::refresh_search_index`), so it is not mapped here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub title: String,

    pub author: String,

    #[sea_orm(nullable)]
    pub genre: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,

    #[sea_orm(nullable)]
    pub page_count: Option<i32>,

    #[sea_orm(nullable)]
    pub publication_year: Option<i32>,

    /// Cover image URL.
    #[sea_orm(nullable)]
    pub image_url: Option<String>,

    /// Retrieval URL at the blob-storage provider (PDF uploads only).
    #[sea_orm(nullable)]
    pub pdf_url: Option<String>,

    #[sea_orm(default_value = false)]
    pub is_pdf: bool,

    /// Size in bytes of the stored PDF.
    #[sea_orm(nullable)]
    pub file_size: Option<i64>,

    /// Bounded text preview extracted at ingestion time, fed into the
    /// search index.
    #[sea_orm(column_type = "Text", nullable)]
    pub content_preview: Option<String>,

    #[sea_orm(nullable)]
    pub upload_date: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,

    #[sea_orm(has_many = "super::reading_list_book::Entity")]
    ReadingListBooks,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::reading_list_book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingListBooks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
