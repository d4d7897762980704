//! Content report repository.

use std::sync::Arc;

use crate::entities::{ContentReport, content_report};
use booknook_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};

#[derive(Clone)]
pub struct ContentReportRepository {
    db: Arc<DatabaseConnection>,
}

impl ContentReportRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Create a new content report.
    pub async fn create(
        &self,
        model: content_report::ActiveModel,
    ) -> AppResult<content_report::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all reports, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<content_report::Model>> {
        ContentReport::find()
            .order_by_desc(content_report::Column::ReportDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get reports filtered by status, newest first.
    pub async fn find_by_status(
        &self,
        status: content_report::ReportStatus,
    ) -> AppResult<Vec<content_report::Model>> {
        ContentReport::find()
            .filter(content_report::Column::Status.eq(status))
            .order_by_desc(content_report::Column::ReportDate)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_all() {
        let report = content_report::Model {
            id: "rep1".to_string(),
            user_id: "user1".to_string(),
            book_id: "book1".to_string(),
            reason: "inappropriate".to_string(),
            details: String::new(),
            report_date: Utc::now().into(),
            status: content_report::ReportStatus::Pending,
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[report.clone()]])
                .into_connection(),
        );

        let repo = ContentReportRepository::new(db);
        let result = repo.find_all().await.unwrap();

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].status, content_report::ReportStatus::Pending);
    }
}
