//! Search service.

use booknook_common::AppResult;
use booknook_db::{entities::book, repositories::BookRepository};

/// Full-text search over the book catalog.
#[derive(Clone)]
pub struct SearchService {
    book_repo: BookRepository,
}

impl SearchService {
    /// Create a new search service.
    #[must_use]
    pub const fn new(book_repo: BookRepository) -> Self {
        Self { book_repo }
    }

    /// Recompute the search vector for all rows.
    pub async fn refresh_all(&self) -> AppResult<()> {
        self.book_repo.refresh_search_index().await
    }

    /// Free-text query across all books. A missing or blank query matches
    /// nothing.
    pub async fn query(&self, q: Option<&str>) -> AppResult<Vec<book::Model>> {
        self.search(q, false).await
    }

    /// Free-text query restricted to uploaded PDFs.
    pub async fn query_pdfs(&self, q: Option<&str>) -> AppResult<Vec<book::Model>> {
        self.search(q, true).await
    }

    async fn search(&self, q: Option<&str>, pdf_only: bool) -> AppResult<Vec<book::Model>> {
        let Some(q) = q else {
            return Ok(vec![]);
        };
        let q = q.trim();
        if q.is_empty() {
            return Ok(vec![]);
        }

        self.book_repo.search_fulltext(q, pdf_only).await
    }
}
