//! Content report service.

use booknook_common::{AppResult, IdGenerator};
use booknook_db::{
    entities::content_report,
    repositories::{BookRepository, ContentReportRepository},
};
use sea_orm::Set;

use crate::validate;

/// Files content reports. Reports are append-only and never deduplicated.
#[derive(Clone)]
pub struct ReportService {
    report_repo: ContentReportRepository,
    book_repo: BookRepository,
    id_gen: IdGenerator,
}

impl ReportService {
    /// Create a new report service.
    #[must_use]
    pub const fn new(report_repo: ContentReportRepository, book_repo: BookRepository) -> Self {
        Self {
            report_repo,
            book_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// File a report against a book. `details` defaults to empty; status
    /// starts as pending.
    pub async fn file_report(
        &self,
        user_id: &str,
        book_id: &str,
        reason: &str,
        details: Option<String>,
    ) -> AppResult<content_report::Model> {
        validate::report_reason(reason)?;
        self.book_repo.get_by_id(book_id).await?;

        let model = content_report::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id.to_string()),
            book_id: Set(book_id.to_string()),
            reason: Set(reason.to_string()),
            details: Set(details.unwrap_or_default()),
            report_date: Set(chrono::Utc::now().into()),
            status: Set(content_report::ReportStatus::Pending),
        };

        self.report_repo.create(model).await
    }

    /// All filed reports, newest first.
    pub async fn list(&self) -> AppResult<Vec<content_report::Model>> {
        self.report_repo.find_all().await
    }
}
