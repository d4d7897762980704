//! Create reviews table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Reviews::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Reviews::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Reviews::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(Reviews::BookId).string_len(32).not_null())
                    .col(ColumnDef::new(Reviews::ReviewText).text().not_null())
                    .col(ColumnDef::new(Reviews::Rating).integer().not_null())
                    .col(
                        ColumnDef::new(Reviews::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_user")
                            .from(Reviews::Table, Reviews::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reviews_book")
                            .from(Reviews::Table, Reviews::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one review per (user, book) pair. The database is
        // the arbiter for concurrent duplicate inserts.
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_user_book")
                    .table(Reviews::Table)
                    .col(Reviews::UserId)
                    .col(Reviews::BookId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Index: book_id (reviews listed per book)
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_book_id")
                    .table(Reviews::Table)
                    .col(Reviews::BookId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reviews::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Reviews {
    Table,
    Id,
    UserId,
    BookId,
    ReviewText,
    Rating,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
}
