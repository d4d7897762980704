//! Create books table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Books::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Books::Id).string_len(32).not_null().primary_key())
                    .col(ColumnDef::new(Books::Title).string_len(512).not_null())
                    .col(ColumnDef::new(Books::Author).string_len(256).not_null())
                    .col(ColumnDef::new(Books::Genre).string_len(100))
                    .col(ColumnDef::new(Books::Description).text())
                    .col(ColumnDef::new(Books::PageCount).integer())
                    .col(ColumnDef::new(Books::PublicationYear).integer())
                    .col(ColumnDef::new(Books::ImageUrl).string_len(1024))
                    .col(ColumnDef::new(Books::PdfUrl).string_len(1024))
                    .col(ColumnDef::new(Books::IsPdf).boolean().not_null().default(false))
                    .col(ColumnDef::new(Books::FileSize).big_integer())
                    .col(ColumnDef::new(Books::ContentPreview).text())
                    .col(ColumnDef::new(Books::UploadDate).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Books::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: is_pdf (PDF-only search filter)
        manager
            .create_index(
                Index::create()
                    .name("idx_books_is_pdf")
                    .table(Books::Table)
                    .col(Books::IsPdf)
                    .to_owned(),
            )
            .await?;

        // Index: created_at
        manager
            .create_index(
                Index::create()
                    .name("idx_books_created_at")
                    .table(Books::Table)
                    .col(Books::CreatedAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Books::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Books {
    Table,
    Id,
    Title,
    Author,
    Genre,
    Description,
    PageCount,
    PublicationYear,
    ImageUrl,
    PdfUrl,
    IsPdf,
    FileSize,
    ContentPreview,
    UploadDate,
    CreatedAt,
}
