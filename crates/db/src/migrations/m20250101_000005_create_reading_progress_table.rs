//! Create reading progress table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingProgress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingProgress::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReadingProgress::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(ReadingProgress::BookId).string_len(32).not_null())
                    .col(
                        ColumnDef::new(ReadingProgress::CurrentPage)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::Percentage)
                            .double()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(ReadingProgress::LastRead)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_progress_user")
                            .from(ReadingProgress::Table, ReadingProgress::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_progress_book")
                            .from(ReadingProgress::Table, ReadingProgress::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: one progress row per (user, book) pair
        manager
            .create_index(
                Index::create()
                    .name("idx_reading_progress_user_book")
                    .table(ReadingProgress::Table)
                    .col(ReadingProgress::UserId)
                    .col(ReadingProgress::BookId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingProgress::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReadingProgress {
    Table,
    Id,
    UserId,
    BookId,
    CurrentPage,
    Percentage,
    LastRead,
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
