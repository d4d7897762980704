//! Add the denormalized search vector column and its GIN index.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // The tsvector column is maintained entirely by
        // BookRepository::refresh_search_index; rows start out NULL and do
        // not match any query until the first refresh.
        manager
            .get_connection()
            .execute_unprepared(
                r"
                ALTER TABLE books
                ADD COLUMN IF NOT EXISTS search_vector tsvector;
                ",
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r"
                CREATE INDEX IF NOT EXISTS idx_books_search_vector
                ON books
                USING GIN (search_vector);
                ",
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP INDEX IF EXISTS idx_books_search_vector;")
            .await?;

        manager
            .get_connection()
            .execute_unprepared("ALTER TABLE books DROP COLUMN IF EXISTS search_vector;")
            .await?;

        Ok(())
    }
}
