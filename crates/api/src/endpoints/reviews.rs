//! Review endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use booknook_common::AppResult;
use booknook_core::{CreateReviewInput, UpdateReviewInput};

use crate::{
    middleware::AppState,
    response::{MessageResponse, ReviewDto},
};

async fn list_reviews(State(state): State<AppState>) -> AppResult<Json<Vec<ReviewDto>>> {
    let reviews = state.review_service.list().await?;
    Ok(Json(reviews.into_iter().map(Into::into).collect()))
}

async fn get_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReviewDto>> {
    let review = state.review_service.get(&id).await?;
    Ok(Json(review.into()))
}

async fn create_review(
    State(state): State<AppState>,
    Json(input): Json<CreateReviewInput>,
) -> AppResult<impl IntoResponse> {
    let review = state.review_service.create(input).await?;
    Ok((StatusCode::CREATED, Json(ReviewDto::from(review))))
}

async fn update_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateReviewInput>,
) -> AppResult<Json<ReviewDto>> {
    let review = state.review_service.update(&id, input).await?;
    Ok(Json(review.into()))
}

async fn delete_review(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.review_service.delete(&id).await?;
    Ok(Json(MessageResponse::new("Review deleted successfully")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reviews).post(create_review))
        .route(
            "/{id}",
            get(get_review).put(update_review).delete(delete_review),
        )
}
