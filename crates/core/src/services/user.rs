//! User service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use booknook_common::{AppError, AppResult, IdGenerator};
use booknook_db::{entities::user, repositories::UserRepository};
use sea_orm::Set;

use crate::validate;

/// User service for account creation and credential checks.
#[derive(Clone)]
pub struct UserService {
    user_repo: UserRepository,
    id_gen: IdGenerator,
}

impl UserService {
    /// Create a new user service.
    #[must_use]
    pub const fn new(user_repo: UserRepository) -> Self {
        Self {
            user_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a new user with a hashed password.
    pub async fn create(&self, username: &str, password: &str) -> AppResult<user::Model> {
        validate::username(username)?;

        if password.is_empty() {
            return Err(AppError::Validation("Password is required".to_string()));
        }

        if self.user_repo.find_by_username(username).await?.is_some() {
            return Err(AppError::Conflict("Username already exists".to_string()));
        }

        let password_hash = hash_password(password)?;

        let model = user::ActiveModel {
            id: Set(self.id_gen.generate()),
            username: Set(username.to_string()),
            password_hash: Set(password_hash),
            created_at: Set(chrono::Utc::now().into()),
        };

        // The unique index still wins the race if two signups collide.
        self.user_repo.create(model).await
    }

    /// Get a user by ID.
    pub async fn get(&self, id: &str) -> AppResult<user::Model> {
        self.user_repo.get_by_id(id).await
    }

    /// Get all users.
    pub async fn list(&self) -> AppResult<Vec<user::Model>> {
        self.user_repo.find_all().await
    }

    /// Authenticate by username and password.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<user::Model> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        Ok(user)
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;

    fn create_test_user(id: &str, username: &str) -> user::Model {
        user::Model {
            id: id.to_string(),
            username: username.to_string(),
            password_hash: hash_password("correct_horse").unwrap(),
            created_at: Utc::now().into(),
        }
    }

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123").unwrap();
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_verify_password_round_trip() {
        let hash = hash_password("secret").unwrap();
        assert!(verify_password("secret", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_hash_password_salted() {
        let hash1 = hash_password("same").unwrap();
        let hash2 = hash_password("same").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[tokio::test]
    async fn test_create_rejects_bad_username() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db));

        let result = service.create("ab", "password").await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let service = UserService::new(UserRepository::new(db));
        let result = service.create("12345", "password").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_rejects_taken_username() {
        let existing = create_test_user("user1", "ian");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service.create("ian", "password").await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_authenticate_unknown_user() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user::Model>::new()])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service.authenticate("nobody", "pw").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }

    #[tokio::test]
    async fn test_authenticate_wrong_password() {
        let user = create_test_user("user1", "ian");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[user]])
                .into_connection(),
        );
        let service = UserService::new(UserRepository::new(db));

        let result = service.authenticate("ian", "not_the_password").await;
        assert!(matches!(result, Err(AppError::Unauthorized)));
    }
}
