//! User endpoints.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use booknook_common::{AppError, AppResult};
use serde::Deserialize;

use crate::{middleware::AppState, response::UserDto};

#[derive(Debug, Deserialize)]
struct CreateUserRequest {
    username: Option<String>,
    password: Option<String>,
}

async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserDto>>> {
    let users = state.user_service.list().await?;
    Ok(Json(users.into_iter().map(Into::into).collect()))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserDto>> {
    let user = state.user_service.get(&id).await?;
    Ok(Json(user.into()))
}

async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::MissingField(
            "Username and password are required".to_string(),
        ));
    };

    let user = state.user_service.create(&username, &password).await?;
    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user))
}
