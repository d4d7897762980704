//! Book repository.

use std::sync::Arc;

use crate::entities::{Book, book};
use booknook_common::{AppError, AppResult};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, DbBackend, EntityTrait,
    QueryFilter, QueryOrder, Statement,
};

/// Book repository for database operations, including the maintenance of
/// the denormalized full-text search column.
#[derive(Clone)]
pub struct BookRepository {
    db: Arc<DatabaseConnection>,
}

impl BookRepository {
    /// Create a new book repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a book by ID.
    pub async fn find_by_id(&self, id: &str) -> AppResult<Option<book::Model>> {
        Book::find_by_id(id)
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a book by ID, returning an error if not found.
    pub async fn get_by_id(&self, id: &str) -> AppResult<book::Model> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::BookNotFound(id.to_string()))
    }

    /// Find books by IDs.
    pub async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<book::Model>> {
        if ids.is_empty() {
            return Ok(vec![]);
        }

        Book::find()
            .filter(book::Column::Id.is_in(ids.to_vec()))
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get all books, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<book::Model>> {
        Book::find()
            .order_by_asc(book::Column::CreatedAt)
            .all(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Create a new book.
    pub async fn create(&self, model: book::ActiveModel) -> AppResult<book::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Update a book.
    pub async fn update(&self, model: book::ActiveModel) -> AppResult<book::Model> {
        model
            .update(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Recompute the search vector for every row (full refresh).
    ///
    /// The searchable text is title, author, description and the extracted
    /// content preview; rows never refreshed keep a NULL vector and match
    /// nothing.
    pub async fn refresh_search_index(&self) -> AppResult<()> {
        self.db
            .execute(Statement::from_string(
                DbBackend::Postgres,
                r"
                UPDATE books
                SET search_vector = to_tsvector('english',
                    title || ' ' || author || ' '
                    || COALESCE(description, '') || ' '
                    || COALESCE(content_preview, ''))
                "
                .to_string(),
            ))
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(())
    }

    /// Full-text search over the refreshed search vector.
    ///
    /// Uses the GIN index; `pdf_only` additionally restricts matches to
    /// uploaded PDFs.
    pub async fn search_fulltext(
        &self,
        query: &str,
        pdf_only: bool,
    ) -> AppResult<Vec<book::Model>> {
        // Escape query for tsquery
        let escaped_query = query
            .replace('\\', "\\\\")
            .replace('\'', "''")
            .replace(['&', '|', '!', '(', ')', ':'], " ");

        let pdf_clause = if pdf_only { "AND is_pdf = TRUE" } else { "" };

        let sql = format!(
            r"
            SELECT
                id, title, author, genre, description, page_count,
                publication_year, image_url, pdf_url, is_pdf, file_size,
                content_preview, upload_date, created_at
            FROM books
            WHERE search_vector @@ plainto_tsquery('english', $1)
                {pdf_clause}
            ORDER BY created_at DESC
            "
        );

        Book::find()
            .from_raw_sql(Statement::from_sql_and_values(
                DbBackend::Postgres,
                &sql,
                [escaped_query.into()],
            ))
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

    fn create_test_book(id: &str, title: &str) -> book::Model {
        book::Model {
            id: id.to_string(),
            title: title.to_string(),
            author: "Author".to_string(),
            genre: None,
            description: None,
            page_count: Some(100),
            publication_year: Some(2020),
            image_url: None,
            pdf_url: None,
            is_pdf: false,
            file_size: None,
            content_preview: None,
            upload_date: None,
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_find_by_id() {
        let book = create_test_book("book1", "Rational Male");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[book.clone()]])
                .into_connection(),
        );

        let repo = BookRepository::new(db);
        let result = repo.find_by_id("book1").await.unwrap();

        assert!(result.is_some());
        assert_eq!(result.unwrap().title, "Rational Male");
    }

    #[tokio::test]
    async fn test_find_by_ids_empty_is_no_query() {
        let db = Arc::new(MockDatabase::new(DatabaseBackend::Postgres).into_connection());

        let repo = BookRepository::new(db);
        let result = repo.find_by_ids(&[]).await.unwrap();

        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_not_found() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<book::Model>::new()])
                .into_connection(),
        );

        let repo = BookRepository::new(db);
        let result = repo.get_by_id("missing").await;

        match result {
            Err(AppError::BookNotFound(id)) => assert_eq!(id, "missing"),
            _ => panic!("Expected BookNotFound error"),
        }
    }
}
