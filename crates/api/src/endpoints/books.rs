//! Book catalog endpoints. The whole prefix sits behind the auth guard.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use booknook_common::AppResult;
use booknook_core::CreateBookInput;

use crate::{middleware::AppState, response::BookDto};

async fn list_books(State(state): State<AppState>) -> AppResult<Json<Vec<BookDto>>> {
    let books = state.book_service.list().await?;
    Ok(Json(books.into_iter().map(Into::into).collect()))
}

async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookDto>> {
    let book = state.book_service.get(&id).await?;
    Ok(Json(book.into()))
}

async fn create_book(
    State(state): State<AppState>,
    Json(input): Json<CreateBookInput>,
) -> AppResult<impl IntoResponse> {
    let book = state.book_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(BookDto::from(book))))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_books).post(create_book))
        .route("/{id}", get(get_book))
}
