//! Review service.

use booknook_common::{AppError, AppResult, IdGenerator};
use booknook_db::{
    entities::review,
    repositories::{BookRepository, ReviewRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;

use crate::validate;

/// Review service for creating and maintaining book reviews.
#[derive(Clone)]
pub struct ReviewService {
    review_repo: ReviewRepository,
    user_repo: UserRepository,
    book_repo: BookRepository,
    id_gen: IdGenerator,
}

/// Input for creating a review.
#[derive(Debug, Deserialize)]
pub struct CreateReviewInput {
    pub user_id: Option<String>,
    pub book_id: Option<String>,
    pub review_text: Option<String>,
    pub rating: Option<i32>,
}

/// Partial update of a review.
#[derive(Debug, Deserialize)]
pub struct UpdateReviewInput {
    pub review_text: Option<String>,
    pub rating: Option<i32>,
}

impl ReviewService {
    /// Create a new review service.
    #[must_use]
    pub const fn new(
        review_repo: ReviewRepository,
        user_repo: UserRepository,
        book_repo: BookRepository,
    ) -> Self {
        Self {
            review_repo,
            user_repo,
            book_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a review. At most one review per (user, book) pair.
    pub async fn create(&self, input: CreateReviewInput) -> AppResult<review::Model> {
        let (Some(user_id), Some(book_id), Some(review_text), Some(rating)) =
            (input.user_id, input.book_id, input.review_text, input.rating)
        else {
            return Err(AppError::MissingField(
                "user_id, book_id, review_text and rating are required".to_string(),
            ));
        };

        validate::review_text(&review_text)?;
        validate::rating(rating)?;

        self.user_repo.get_by_id(&user_id).await?;
        self.book_repo.get_by_id(&book_id).await?;

        if self
            .review_repo
            .find_by_user_and_book(&user_id, &book_id)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "User has already reviewed this book".to_string(),
            ));
        }

        let model = review::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id),
            book_id: Set(book_id),
            review_text: Set(review_text.trim().to_string()),
            rating: Set(rating),
            created_at: Set(chrono::Utc::now().into()),
        };

        // The unique index catches the concurrent-duplicate race; the
        // repository translates it to Conflict.
        self.review_repo.create(model).await
    }

    /// Get a review by ID.
    pub async fn get(&self, id: &str) -> AppResult<review::Model> {
        self.review_repo.get_by_id(id).await
    }

    /// Get all reviews.
    pub async fn list(&self) -> AppResult<Vec<review::Model>> {
        self.review_repo.find_all().await
    }

    /// Get reviews for a book.
    pub async fn list_for_book(&self, book_id: &str) -> AppResult<Vec<review::Model>> {
        self.review_repo.find_by_book(book_id).await
    }

    /// Apply a partial update.
    pub async fn update(&self, id: &str, input: UpdateReviewInput) -> AppResult<review::Model> {
        let review = self.review_repo.get_by_id(id).await?;
        let mut active: review::ActiveModel = review.into();

        if let Some(text) = input.review_text {
            validate::review_text(&text)?;
            active.review_text = Set(text.trim().to_string());
        }
        if let Some(rating) = input.rating {
            validate::rating(rating)?;
            active.rating = Set(rating);
        }

        self.review_repo.update(active).await
    }

    /// Delete a review.
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        let review = self.review_repo.get_by_id(id).await?;
        self.review_repo.delete(review).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use booknook_db::entities::{book, user};
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
    use std::sync::Arc;

    fn empty_service() -> ReviewService {
        let mk = || Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        ReviewService::new(
            ReviewRepository::new(mk()),
            UserRepository::new(mk()),
            BookRepository::new(mk()),
        )
    }

    fn service_with(
        review_db: Arc<DatabaseConnection>,
        user_db: Arc<DatabaseConnection>,
        book_db: Arc<DatabaseConnection>,
    ) -> ReviewService {
        ReviewService::new(
            ReviewRepository::new(review_db),
            UserRepository::new(user_db),
            BookRepository::new(book_db),
        )
    }

    fn test_user() -> user::Model {
        user::Model {
            id: "user1".to_string(),
            username: "ian".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            created_at: Utc::now().into(),
        }
    }

    fn test_book() -> book::Model {
        book::Model {
            id: "book1".to_string(),
            title: "Rational Male".to_string(),
            author: "Rollo Tomassi".to_string(),
            genre: None,
            description: None,
            page_count: Some(384),
            publication_year: Some(2013),
            image_url: None,
            pdf_url: None,
            is_pdf: false,
            file_size: None,
            content_preview: None,
            upload_date: None,
            created_at: Utc::now().into(),
        }
    }

    fn existing_review() -> review::Model {
        review::Model {
            id: "rev1".to_string(),
            user_id: "user1".to_string(),
            book_id: "book1".to_string(),
            review_text: "Already said my piece".to_string(),
            rating: 4,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let service = empty_service();

        let result = service
            .create(CreateReviewInput {
                user_id: Some("user1".to_string()),
                book_id: None,
                review_text: Some("text".to_string()),
                rating: Some(5),
            })
            .await;

        assert!(matches!(result, Err(AppError::MissingField(_))));
    }

    #[tokio::test]
    async fn test_create_invalid_rating() {
        let service = empty_service();

        let result = service
            .create(CreateReviewInput {
                user_id: Some("user1".to_string()),
                book_id: Some("book1".to_string()),
                review_text: Some("text".to_string()),
                rating: Some(9),
            })
            .await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_duplicate_pair() {
        let review_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[existing_review()]])
                .into_connection(),
        );
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user()]])
                .into_connection(),
        );
        let book_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_book()]])
                .into_connection(),
        );

        let service = service_with(review_db, user_db, book_db);

        let result = service
            .create(CreateReviewInput {
                user_id: Some("user1".to_string()),
                book_id: Some("book1".to_string()),
                review_text: Some("Another take".to_string()),
                rating: Some(2),
            })
            .await;

        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_create_unknown_book() {
        let review_db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
        let user_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[test_user()]])
                .into_connection(),
        );
        let book_db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<book::Model>::new()])
                .into_connection(),
        );

        let service = service_with(review_db, user_db, book_db);

        let result = service
            .create(CreateReviewInput {
                user_id: Some("user1".to_string()),
                book_id: Some("missing".to_string()),
                review_text: Some("text".to_string()),
                rating: Some(3),
            })
            .await;

        assert!(matches!(result, Err(AppError::BookNotFound(_))));
    }
}
