//! Session repository.

use std::sync::Arc;

use crate::entities::{Session, session};
use booknook_common::{AppError, AppResult};
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

#[derive(Clone)]
pub struct SessionRepository {
    db: Arc<DatabaseConnection>,
}

impl SessionRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a session by its token.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<session::Model>> {
        Session::find_by_id(token)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new session.
    pub async fn create(&self, model: session::ActiveModel) -> AppResult<session::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a session by token. Returns whether a row was removed.
    pub async fn delete(&self, token: &str) -> AppResult<bool> {
        let result = Session::delete_by_id(token)
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected > 0)
    }

    /// Delete all sessions belonging to a user.
    pub async fn delete_by_user(&self, user_id: &str) -> AppResult<u64> {
        let result = Session::delete_many()
            .filter(session::Column::UserId.eq(user_id))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }

    /// Purge expired sessions.
    pub async fn delete_expired(&self) -> AppResult<u64> {
        let result = Session::delete_many()
            .filter(session::Column::ExpiresAt.lt(Utc::now()))
            .exec(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(result.rows_affected)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_find_by_token() {
        let session = session::Model {
            id: "tok123".to_string(),
            user_id: "user1".to_string(),
            created_at: Utc::now().into(),
            expires_at: (Utc::now() + Duration::days(30)).into(),
        };

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[session.clone()]])
                .into_connection(),
        );

        let repo = SessionRepository::new(db);
        let result = repo.find_by_token("tok123").await.unwrap();

        assert!(result.is_some());
        let found = result.unwrap();
        assert_eq!(found.user_id, "user1");
        assert!(!found.is_expired());
    }
}
