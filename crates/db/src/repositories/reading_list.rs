//! Reading list repository.

use std::sync::Arc;

use crate::entities::{ReadingList, ReadingListBook, reading_list, reading_list_book};
use booknook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

#[derive(Clone)]
pub struct ReadingListRepository {
    db: Arc<DatabaseConnection>,
}

impl ReadingListRepository {
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a reading list by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<reading_list::Model>> {
        ReadingList::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a reading list by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<reading_list::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Reading list not found: {id}")))
    }

    /// Get all reading lists, newest first.
    pub async fn find_all(&self) -> AppResult<Vec<reading_list::Model>> {
        ReadingList::find()
            .order_by_desc(reading_list::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find all reading lists owned by a user, newest first.
    pub async fn find_by_user(&self, user_id: &str) -> AppResult<Vec<reading_list::Model>> {
        ReadingList::find()
            .filter(reading_list::Column::UserId.eq(user_id))
            .order_by_desc(reading_list::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Find a user's list by name (names are unique per user).
    pub async fn find_by_user_and_name(
        &self,
        user_id: &str,
        name: &str,
    ) -> AppResult<Option<reading_list::Model>> {
        ReadingList::find()
            .filter(reading_list::Column::UserId.eq(user_id))
            .filter(reading_list::Column::Name.eq(name))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a reading list with its initial members in one transaction.
    pub async fn create_with_members(
        &self,
        list: reading_list::ActiveModel,
        members: Vec<reading_list_book::ActiveModel>,
    ) -> AppResult<reading_list::Model> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let created = list.insert(&txn).await.map_err(AppError::from)?;

        if !members.is_empty() {
            ReadingListBook::insert_many(members)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(created)
    }

    /// Update the list row itself.
    pub async fn update(&self, model: reading_list::ActiveModel) -> AppResult<reading_list::Model> {
        model.update(self.db.as_ref()).await.map_err(AppError::from)
    }

    /// Replace a list's member set wholesale.
    pub async fn replace_members(
        &self,
        list_id: &str,
        members: Vec<reading_list_book::ActiveModel>,
    ) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        ReadingListBook::delete_many()
            .filter(reading_list_book::Column::ReadingListId.eq(list_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        if !members.is_empty() {
            ReadingListBook::insert_many(members)
                .exec(&txn)
                .await
                .map_err(|e| AppError::Database(e.to_string()))?;
        }

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Delete a list and its memberships in one transaction.
    pub async fn delete(&self, list_id: &str) -> AppResult<()> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        ReadingListBook::delete_many()
            .filter(reading_list_book::Column::ReadingListId.eq(list_id))
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        ReadingList::delete_by_id(list_id)
            .exec(&txn)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        txn.commit()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Fetch a list's members ordered by when they were added.
    pub async fn find_members(&self, list_id: &str) -> AppResult<Vec<reading_list_book::Model>> {
        ReadingListBook::find()
            .filter(reading_list_book::Column::ReadingListId.eq(list_id))
            .order_by_asc(reading_list_book::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
