//! Session entity.

use sea_orm::entity::prelude::*;

/// Server-side session row.
///
/// The `id` is the opaque token carried by the session cookie; everything
/// else stays on the server.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "sessions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,

    pub user_id: String,

    pub created_at: DateTimeWithTimeZone,

    pub expires_at: DateTimeWithTimeZone,
}

impl Model {
    /// Check if the session is past its expiry.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        use chrono::Utc;
        self.expires_at < Utc::now().fixed_offset()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
