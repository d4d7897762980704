//! Create reading list and association tables migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ReadingLists::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingLists::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ReadingLists::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(ReadingLists::Name).string_len(80).not_null())
                    .col(
                        ColumnDef::new(ReadingLists::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(ColumnDef::new(ReadingLists::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_lists_user")
                            .from(ReadingLists::Table, ReadingLists::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: list name per user
        manager
            .create_index(
                Index::create()
                    .name("idx_reading_lists_user_name")
                    .table(ReadingLists::Table)
                    .col(ReadingLists::UserId)
                    .col(ReadingLists::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(ReadingListBooks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ReadingListBooks::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(ReadingListBooks::ReadingListId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(ReadingListBooks::BookId).string_len(32).not_null())
                    .col(ColumnDef::new(ReadingListBooks::Note).text())
                    .col(ColumnDef::new(ReadingListBooks::Rating).integer())
                    .col(
                        ColumnDef::new(ReadingListBooks::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_list_books_list")
                            .from(ReadingListBooks::Table, ReadingListBooks::ReadingListId)
                            .to(ReadingLists::Table, ReadingLists::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_reading_list_books_book")
                            .from(ReadingListBooks::Table, ReadingListBooks::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Unique index: no duplicate book within one list
        manager
            .create_index(
                Index::create()
                    .name("idx_reading_list_books_list_book")
                    .table(ReadingListBooks::Table)
                    .col(ReadingListBooks::ReadingListId)
                    .col(ReadingListBooks::BookId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ReadingListBooks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ReadingLists::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ReadingLists {
    Table,
    Id,
    UserId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum ReadingListBooks {
    Table,
    Id,
    ReadingListId,
    BookId,
    Note,
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
