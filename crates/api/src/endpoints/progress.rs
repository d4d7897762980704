//! Reading progress endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};
use booknook_common::{AppError, AppResult};
use booknook_core::ProgressSnapshot;
use serde::Deserialize;
use serde_json::json;

use crate::{extractors::AuthUser, middleware::AppState};

#[derive(Debug, Deserialize)]
struct UpdateProgressRequest {
    book_id: Option<String>,
    page: Option<i32>,
    percentage: Option<f64>,
}

/// Upsert the caller's position in a book.
async fn update_progress(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<UpdateProgressRequest>,
) -> AppResult<Json<serde_json::Value>> {
    let (Some(book_id), Some(page), Some(percentage)) = (req.book_id, req.page, req.percentage)
    else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    state
        .progress_service
        .upsert(&user.id, &book_id, page, percentage)
        .await?;

    Ok(Json(json!({"success": true})))
}

/// Stored position, or the defaults when the caller never opened the book.
async fn get_progress(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Json<ProgressSnapshot>> {
    let snapshot = state.progress_service.snapshot(&user.id, &book_id).await?;
    Ok(Json(snapshot))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(update_progress))
        .route("/{book_id}", get(get_progress))
}
