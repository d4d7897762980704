//! Full-text search endpoints.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use booknook_common::AppResult;
use serde::Deserialize;

use crate::{middleware::AppState, response::BookDto};

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
}

/// Search the whole catalog.
async fn search_books(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.search_service.query(query.q.as_deref()).await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

/// Search uploaded PDFs only.
async fn search_pdfs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.search_service.query_pdfs(query.q.as_deref()).await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/search", get(search_books))
        .route("/search-pdfs", get(search_pdfs))
}
