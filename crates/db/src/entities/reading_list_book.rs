//! Reading list member entity.

use sea_orm::entity::prelude::*;

/// Association row between a reading list and a book.
///
/// Carries the per-pair annotation (note, rating); the list ↔ book
/// relationship is many-to-many with metadata, not a plain join table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "reading_list_books")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    /// The list this entry belongs to.
    pub reading_list_id: String,

    /// The book on the list.
    pub book_id: String,

    /// Free-form note about the book within this list.
    #[sea_orm(column_type = "Text", nullable)]
    pub note: Option<String>,

    /// Per-list rating, 1 through 5.
    #[sea_orm(nullable)]
    pub rating: Option<i32>,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::reading_list::Entity",
        from = "Column::ReadingListId",
        to = "super::reading_list::Column::Id"
    )]
    ReadingList,
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id"
    )]
    Book,
}

impl Related<super::reading_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingList.def()
    }
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
