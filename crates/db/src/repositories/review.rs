//! Review repository.

use std::sync::Arc;

use crate::entities::{Review, review};
use booknook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder,
};

#[derive(Clone)]
pub struct ReviewRepository {
    db: Arc<DatabaseConnection>,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a review by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<review::Model>> {
        Review::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a review by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<review::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Review not found: {id}")))
    }

    /// Get all reviews, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<review::Model>> {
        Review::find()
            .order_by_desc(review::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find reviews for a book, newest first.
    pub async fn find_by_book(&self, book_id: &str) -> AppResult<Vec<review::Model>> {
        Review::find()
            .filter(review::Column::BookId.eq(book_id))
            .order_by_desc(review::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find an existing review by a user for a book.
    pub async fn find_by_user_and_book(
        &self,
        user_id: &str,
        book_id: &str,
    ) -> AppResult<Option<review::Model>> {
        Review::find()
            .filter(review::Column::UserId.eq(user_id))
            .filter(review::Column::BookId.eq(book_id))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new review. A duplicate (user, book) pair surfaces as a
    /// conflict via the unique index.
    pub async fn create(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model.insert(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Update a review.
    pub async fn update(&self, model: review::ActiveModel) -> AppResult<review::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a review.
    pub async fn delete(&self, model: review::Model) -> AppResult<()> {
        model
            .delete(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(())
    }
}
