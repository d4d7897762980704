//! Reading list endpoints. The whole prefix sits behind the auth guard.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use booknook_common::{AppError, AppResult};
use booknook_core::{CreateReadingListInput, UpdateReadingListInput};
use serde::Deserialize;

use crate::{
    middleware::AppState,
    response::{MessageResponse, ReadingListDto, UserSummary},
};

#[derive(Debug, Deserialize)]
struct ListQuery {
    user_id: Option<String>,
}

/// All lists for a user, each with its books.
async fn list_reading_lists(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReadingListDto>>> {
    let Some(user_id) = query.user_id else {
        return Err(AppError::BadRequest("user_id is required".to_string()));
    };

    let lists = state.reading_list_service.list_for_user(&user_id).await?;
    Ok(Json(
        lists
            .into_iter()
            .map(|(list, entries)| ReadingListDto::new(list, entries, None))
            .collect(),
    ))
}

/// A single list with its books and owner.
async fn get_reading_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ReadingListDto>> {
    let (list, owner, entries) = state.reading_list_service.get_detail(&id).await?;
    Ok(Json(ReadingListDto::new(
        list,
        entries,
        Some(UserSummary::from(&owner)),
    )))
}

async fn create_reading_list(
    State(state): State<AppState>,
    Json(input): Json<CreateReadingListInput>,
) -> AppResult<impl IntoResponse> {
    let (list, entries) = state.reading_list_service.create(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(ReadingListDto::new(list, entries, None)),
    ))
}

/// Replaces the member set wholesale.
async fn update_reading_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(input): Json<UpdateReadingListInput>,
) -> AppResult<Json<ReadingListDto>> {
    let (list, entries) = state.reading_list_service.update(&id, input).await?;
    Ok(Json(ReadingListDto::new(list, entries, None)))
}

async fn delete_reading_list(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    state.reading_list_service.delete(&id).await?;
    Ok(Json(MessageResponse::new(
        "Reading list deleted successfully",
    )))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_reading_lists).post(create_reading_list))
        .route(
            "/{id}",
            get(get_reading_list)
                .put(update_reading_list)
                .delete(delete_reading_list),
        )
}
