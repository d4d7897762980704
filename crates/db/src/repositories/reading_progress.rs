//! Reading progress repository.

use std::sync::Arc;

use crate::entities::{ReadingProgress, reading_progress};
use booknook_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct ReadingProgressRepository {
    db: Arc<DatabaseConnection>,
}

impl ReadingProgressRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a user's progress on a book.
    pub async fn find_by_user_and_book(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> AppResult<Option<reading_progress::Model>> {
        ReadingProgress::find()
            .filter(reading_progress::Column::UserId.eq(user_id))
            .filter(reading_progress::Column::BookId.eq(book_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Insert a fresh progress row.
    pub async fn create(
        &self,
        model: reading_progress::ActiveModel,
    ) -> AppResult<reading_progress::Model> {
        model.insert(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Update an existing progress row.
    pub async fn update(
        &self,
        model: reading_progress::ActiveModel,
    ) -> AppResult<reading_progress::Model> {
        model
            .update(self.db.as_ref())
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
    async fn test_find_by_user_and_book() {
        let progress = reading_progress::Model {
            id: "prog1".to_string(),
            user_id: "user1".to_string(),
            book_id: "book1".to_string(),
            current_page: 42,
            percentage: 10.9,
            last_read: Utc::now().into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[progress.clone()]])
                .into_connection(),
        );

        let repo = ReadingProgressRepository::new(db);
        let result = repo.find_by_user_and_book("user1", "book1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().current_page, 42);
    }

    #[tokio::test]
    async fn test_find_by_user_and_book_missing() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<reading_progress::Model>::new()])
                .into_connection(),
        );

        let repo = ReadingProgressRepository::new(db);
        let result = repo.find_by_user_and_book("user1", "book1").await.unwrap();

        assert!(result.is_none());
    }
}
