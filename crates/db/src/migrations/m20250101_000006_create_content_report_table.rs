//! Create content reports table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContentReports::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ContentReports::Id)
                            .string_len(32)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ContentReports::UserId).string_len(32).not_null())
                    .col(ColumnDef::new(ContentReports::BookId).string_len(32).not_null())
                    .col(ColumnDef::new(ContentReports::Reason).string_len(100).not_null())
                    .col(
                        ColumnDef::new(ContentReports::Details)
                            .text()
                            .not_null()
                            .default(""),
                    )
                    .col(
                        ColumnDef::new(ContentReports::ReportDate)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(ContentReports::Status)
                            .string_len(32)
                            .not_null()
                            .default("pending"),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_reports_user")
                            .from(ContentReports::Table, ContentReports::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_content_reports_book")
                            .from(ContentReports::Table, ContentReports::BookId)
                            .to(Books::Table, Books::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: status (moderation queue filter)
        manager
            .create_index(
                Index::create()
                    .name("idx_content_reports_status")
                    .table(ContentReports::Table)
                    .col(ContentReports::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContentReports::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ContentReports {
    Table,
    Id,
    UserId,
    BookId,
    Reason,
    Details,
    ReportDate,
    Status,
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
