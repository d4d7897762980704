//! Reading list service.

use booknook_common::{AppError, AppResult, IdGenerator};
use booknook_db::{
    entities::{book, reading_list, reading_list_book, user},
    repositories::{BookRepository, ReadingListRepository, UserRepository},
};
use sea_orm::Set;
use serde::Deserialize;

use crate::validate;

/// Reading list service.
#[derive(Clone)]
pub struct ReadingListService {
    list_repo: ReadingListRepository,
    user_repo: UserRepository,
    book_repo: BookRepository,
    id_gen: IdGenerator,
}

/// Input for creating a reading list.
#[derive(Debug, Deserialize)]
pub struct CreateReadingListInput {
    pub name: Option<String>,
    pub user_id: Option<String>,
    #[serde(default)]
    pub book_ids: Vec<String>,
}

/// Input for updating a reading list. `book_ids` replaces the member set
/// wholesale.
#[derive(Debug, Deserialize)]
pub struct UpdateReadingListInput {
    pub name: Option<String>,
    #[serde(default)]
    pub book_ids: Vec<String>,
}

/// A member row joined with its book.
#[derive(Debug, Clone)]
pub struct ListBookEntry {
    pub member: reading_list_book::Model,
    pub book: book::Model,
}

impl ReadingListService {
    /// Create a new reading list service.
    #[must_use]
    pub const fn new(
        list_repo: ReadingListRepository,
        user_repo: UserRepository,
        book_repo: BookRepository,
    ) -> Self {
        Self {
            list_repo,
            user_repo,
            book_repo,
            id_gen: IdGenerator::new(),
        }
    }

    /// Create a list.
    ///
    /// Check order is observable through the error codes: missing fields,
    /// then unknown user, then duplicate ids, then name conflict, then
    /// unknown books.
    pub async fn create(
        &self,
        input: CreateReadingListInput,
    ) -> AppResult<(reading_list::Model, Vec<ListBookEntry>)> {
        let (Some(name), Some(user_id)) = (input.name, input.user_id) else {
            return Err(AppError::BadRequest(
                "Name and user_id are required".to_string(),
            ));
        };
        validate::list_name(&name)?;

        self.user_repo.get_by_id(&user_id).await?;

        validate::no_duplicate_book_ids(&input.book_ids)?;

        if self
            .list_repo
            .find_by_user_and_name(&user_id, &name)
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(format!(
                "A reading list named '{name}' already exists for this user"
            )));
        }

        let books = self.resolve_books(&input.book_ids).await?;

        let list_id = self.id_gen.generate();
        let now = chrono::Utc::now();

        let list = reading_list::ActiveModel {
            id: Set(list_id.clone()),
            user_id: Set(user_id),
            name: Set(name.trim().to_string()),
            created_at: Set(now.into()),
            updated_at: Set(None),
        };

        let members = self.member_models(&list_id, &input.book_ids);
        let created = self.list_repo.create_with_members(list, members).await?;

        let entries = self.zip_entries(&created.id, books).await?;
        Ok((created, entries))
    }

    /// Get a list with its books and owner.
    pub async fn get_detail(
        &self,
        list_id: &str,
    ) -> AppResult<(reading_list::Model, user::Model, Vec<ListBookEntry>)> {
        let list = self.list_repo.get_by_id(list_id).await?;
        let owner = self.user_repo.get_by_id(&list.user_id).await?;

        let members = self.list_repo.find_members(list_id).await?;
        let book_ids: Vec<String> = members.iter().map(|m| m.book_id.clone()).collect();
        let books = self.book_repo.find_by_ids(&book_ids).await?;

        let entries = members
            .into_iter()
            .filter_map(|member| {
                books
                    .iter()
                    .find(|b| b.id == member.book_id)
                    .cloned()
                    .map(|book| ListBookEntry { member, book })
            })
            .collect();

        Ok((list, owner, entries))
    }

    /// Get all lists owned by a user, each with its books.
    pub async fn list_for_user(
        &self,
        user_id: &str,
    ) -> AppResult<Vec<(reading_list::Model, Vec<ListBookEntry>)>> {
        let lists = self.list_repo.find_by_user(user_id).await?;

        let mut result = Vec::with_capacity(lists.len());
        for list in lists {
            let members = self.list_repo.find_members(&list.id).await?;
            let book_ids: Vec<String> = members.iter().map(|m| m.book_id.clone()).collect();
            let books = self.book_repo.find_by_ids(&book_ids).await?;

            let entries = members
                .into_iter()
                .filter_map(|member| {
                    books
                        .iter()
                        .find(|b| b.id == member.book_id)
                        .cloned()
                        .map(|book| ListBookEntry { member, book })
                })
                .collect();

            result.push((list, entries));
        }

        Ok(result)
    }

    /// Update a list, replacing its member set wholesale.
    pub async fn update(
        &self,
        list_id: &str,
        input: UpdateReadingListInput,
    ) -> AppResult<(reading_list::Model, Vec<ListBookEntry>)> {
        let list = self.list_repo.get_by_id(list_id).await?;

        validate::no_duplicate_book_ids(&input.book_ids)?;
        let books = self.resolve_books(&input.book_ids).await?;

        let mut active: reading_list::ActiveModel = list.into();
        if let Some(name) = input.name {
            validate::list_name(&name)?;
            active.name = Set(name.trim().to_string());
        }
        active.updated_at = Set(Some(chrono::Utc::now().into()));
        let updated = self.list_repo.update(active).await?;

        let members = self.member_models(list_id, &input.book_ids);
        self.list_repo.replace_members(list_id, members).await?;

        let entries = self.zip_entries(list_id, books).await?;
        Ok((updated, entries))
    }

    /// Delete a list and its member rows.
    pub async fn delete(&self, list_id: &str) -> AppResult<()> {
        self.list_repo.get_by_id(list_id).await?;
        self.list_repo.delete(list_id).await
    }

    /// Fetch the named books, erroring on the first id with no row.
    async fn resolve_books(&self, book_ids: &[String]) -> AppResult<Vec<book::Model>> {
        let books = self.book_repo.find_by_ids(book_ids).await?;

        for id in book_ids {
            if !books.iter().any(|b| &b.id == id) {
                return Err(AppError::BookNotFound(id.clone()));
            }
        }

        Ok(books)
    }

    fn member_models(
        &self,
        list_id: &str,
        book_ids: &[String],
    ) -> Vec<reading_list_book::ActiveModel> {
        book_ids
            .iter()
            .map(|book_id| reading_list_book::ActiveModel {
                id: Set(self.id_gen.generate()),
                reading_list_id: Set(list_id.to_string()),
                book_id: Set(book_id.clone()),
                note: Set(None),
                rating: Set(None),
                created_at: Set(chrono::Utc::now().into()),
            })
            .collect()
    }

    async fn zip_entries(
        &self,
        list_id: &str,
        books: Vec<book::Model>,
    ) -> AppResult<Vec<ListBookEntry>> {
        let members = self.list_repo.find_members(list_id).await?;
        Ok(members
            .into_iter()
            .filter_map(|member| {
                books
                    .iter()
                    .find(|b| b.id == member.book_id)
                    .cloned()
                    .map(|book| ListBookEntry { member, book })
            })
            .collect())
    }
}
