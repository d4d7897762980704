//! Database migrations.
//!
//! Schema migrations for the database.

#![allow(missing_docs)]

use sea_orm_migration::prelude::*;

mod m20250101_000001_create_user_table;
mod m20250101_000002_create_book_table;
mod m20250101_000003_create_review_table;
mod m20250101_000004_create_reading_list_tables;
mod m20250101_000005_create_reading_progress_table;
mod m20250101_000006_create_content_report_table;
mod m20250101_000007_create_session_table;
mod m20250101_000008_add_fulltext_search;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_user_table::Migration),
            Box::new(m20250101_000002_create_book_table::Migration),
            Box::new(m20250101_000003_create_review_table::Migration),
            Box::new(m20250101_000004_create_reading_list_tables::Migration),
            Box::new(m20250101_000005_create_reading_progress_table::Migration),
            Box::new(m20250101_000006_create_content_report_table::Migration),
            Box::new(m20250101_000007_create_session_table::Migration),
            Box::new(m20250101_000008_add_fulltext_search::Migration),
        ]
    }
}
