//! User entity.

use sea_orm::entity::prelude::*;

/// User account.
///
/// `password_hash` never appears in API output; endpoint DTOs are built by
/// hand from the model.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    #[sea_orm(unique)]
    pub username: String,

    /// Argon2 hash of the password.
    pub password_hash: String,

    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::review::Entity")]
    Reviews,

    #[sea_orm(has_many = "super::reading_list::Entity")]
    ReadingLists,
}

impl Related<super::review::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::reading_list::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReadingLists.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
