//! Session service.

use booknook_common::{AppError, AppResult, IdGenerator};
use booknook_db::{
    entities::{session, user},
    repositories::{SessionRepository, UserRepository},
};
use chrono::{Duration, Utc};
use sea_orm::Set;

/// Manages server-side sessions. The cookie carries only the opaque token;
/// everything else lives in the `sessions` table.
#[derive(Clone)]
pub struct SessionService {
    session_repo: SessionRepository,
    user_repo: UserRepository,
    id_gen: IdGenerator,
    ttl_days: i64,
}

impl SessionService {
    /// Create a new session service.
    #[must_use]
    pub const fn new(
        session_repo: SessionRepository,
        user_repo: UserRepository,
        ttl_days: i64,
    ) -> Self {
        Self {
            session_repo,
            user_repo,
            id_gen: IdGenerator::new(),
            ttl_days,
        }
    }

    /// Start a new session for a user, returning the token to set in the
    /// cookie.
    pub async fn create(&self, user_id: &str) -> AppResult<session::Model> {
        let now = Utc::now();
        let model = session::ActiveModel {
            id: Set(self.id_gen.generate_token()),
            user_id: Set(user_id.to_string()),
            created_at: Set(now.into()),
            expires_at: Set((now + Duration::days(self.ttl_days)).into()),
        };

        self.session_repo.create(model).await
    }

    /// Resolve a token to its user. Expired or dangling sessions resolve
    /// to `None`.
    pub async fn resolve(&self, token: &str) -> AppResult<Option<user::Model>> {
        let Some(session) = self.session_repo.find_by_token(token).await? else {
            return Ok(None);
        };

        if session.is_expired() {
            // Lazy cleanup; the delete failing is not the caller's problem.
            let _ = self.session_repo.delete(token).await;
            return Ok(None);
        }

        self.user_repo.find_by_id(&session.user_id).await
    }

    /// End a session. Errors with 400 when the token does not name a live
    /// session.
    pub async fn destroy(&self, token: &str) -> AppResult<()> {
        if self.session_repo.delete(token).await? {
            Ok(())
        } else {
            Err(AppError::BadRequest("Not logged in".to_string()))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn expired_session(token: &str) -> session::Model {
        let past = Utc::now() - Duration::days(1);
        session::Model {
            id: token.to_string(),
            user_id: "user1".to_string(),
            created_at: (past - Duration::days(30)).into(),
            expires_at: past.into(),
        }
    }

    fn live_session(token: &str) -> session::Model {
        let now = Utc::now();
        session::Model {
            id: token.to_string(),
            user_id: "user1".to_string(),
            created_at: now.into(),
            expires_at: (now + Duration::days(30)).into(),
        }
    }

    fn test_user() -> user::Model {
        user::Model {
            id: "user1".to_string(),
            username: "ian".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_resolve_unknown_token() {
        let session_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<session::Model>::new()])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = SessionService::new(
            SessionRepository::new(session_db),
            UserRepository::new(user_db),
            30,
        );

        let result = service.resolve("nope").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_resolve_live_session() {
        let session_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[live_session("tok")]])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user()]])
                .into_connection(),
        );

        let service = SessionService::new(
            SessionRepository::new(session_db),
            UserRepository::new(user_db),
            30,
        );

        let result = service.resolve("tok").await.unwrap();
        assert_eq!(result.unwrap().username, "ian");
    }

    #[tokio::test]
    async fn test_resolve_expired_session() {
        let session_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[expired_session("tok")]])
                .append_exec_results([sea_orm::MockExecResult {
                    last_insert_id: 0,
                    rows_affected: 1,
                }])
                .into_connection(),
        );
        let user_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let service = SessionService::new(
            SessionRepository::new(session_db),
            UserRepository::new(user_db),
            30,
        );

        let result = service.resolve("tok").await.unwrap();
        assert!(result.is_none());
    }
}
