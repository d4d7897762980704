//! Reading progress service.

use booknook_common::{AppError, AppResult, IdGenerator};
use booknook_db::{entities::reading_progress, repositories::ReadingProgressRepository};
use chrono::{DateTime, FixedOffset};
use sea_orm::Set;
use serde::Serialize;

/// What a client sees when asking for progress. Defaults stand in when no
/// row exists yet.
#[derive(Debug, Clone, Serialize)]
pub struct ProgressSnapshot {
    pub current_page: i32,
    pub percentage: f64,
    pub last_read: Option<DateTime<FixedOffset>>,
}

impl Default for ProgressSnapshot {
    fn default() -> Self {
        Self {
            current_page: 1,
            percentage: 0.0,
            last_read: None,
        }
    }
}

/// Tracks per-user, per-book reading position.
#[derive(Clone)]
pub struct ReadingProgressService {
    progress_repo: ReadingProgressRepository,
    id_gen: IdGenerator,
}

impl ReadingProgressService {
    /// Create a new reading progress service.
    #[must_use]
    pub const fn new(progress_repo: ReadingProgressRepository) -> Self {
        Self {
            progress_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Overwrite the stored position when a row exists for the pair, else
    /// insert one.
    pub async fn upsert(
        &self,
        user_id: &str,
        book_id: &str,
        page: i32,
        percentage: f64,
    ) -> AppResult<reading_progress::Model> {
        if page < 1 {
            return Err(AppError::BadRequest("Page must be at least 1".to_string()));
        }
        if !(0.0..=100.0).contains(&percentage) {
            return Err(AppError::BadRequest(
                "Percentage must be between 0 and 100".to_string(),
            ));
        }

        let now = chrono::Utc::now();

        match self
            .progress_repo
            .find_by_user_and_book(user_id, book_id)
            .await?
        {
            Some(existing) => {
                let mut active: reading_progress::ActiveModel = existing.into();
                active.current_page = Set(page);
                active.percentage = Set(percentage);
                active.last_read = Set(now.into());
                self.progress_repo.update(active).await
            }
            None => {
                let model = reading_progress::ActiveModel {
                    id: Set(self.id_gen.generate()),
                    user_id: Set(user_id.to_string()),
                    book_id: Set(book_id.to_string()),
                    current_page: Set(page),
                    percentage: Set(percentage),
                    last_read: Set(now.into()),
                };
                self.progress_repo.create(model).await
            }
        }
    }

    /// Stored position for the pair, or the documented defaults when none
    /// exists.
    pub async fn snapshot(&self, user_id: &str, book_id: &str) -> AppResult<ProgressSnapshot> {
        Ok(self
            .progress_repo
            .find_by_user_and_book(user_id, book_id)
            .await?
            .map_or_else(ProgressSnapshot::default, |row| ProgressSnapshot {
                current_page: row.current_page,
                percentage: row.percentage,
                last_read: Some(row.last_read),
            }))
    }
}
