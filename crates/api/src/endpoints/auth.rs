//! Authentication endpoints: signup, login, logout, check-auth.

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use booknook_common::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    extractors::MaybeAuthUser,
    middleware::AppState,
    response::UserSummary,
};

/// Signup/login request body.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Auth success body.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub user: UserSummary,
}

fn session_cookie(name: &str, token: String) -> Cookie<'static> {
    Cookie::build((name.to_string(), token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Create an account and log straight in.
async fn signup(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::MissingField(
            "Username and password are required".to_string(),
        ));
    };
    if username.is_empty() || password.is_empty() {
        return Err(AppError::MissingField(
            "Username and password are required".to_string(),
        ));
    }

    let user = state.user_service.create(&username, &password).await?;
    let session = state.session_service.create(&user.id).await?;

    let jar = jar.add(session_cookie(&state.cookie_name, session.id));

    Ok((
        StatusCode::CREATED,
        jar,
        Json(AuthResponse {
            message: "Signup successful".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// Log in with username and password.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    let (Some(username), Some(password)) = (req.username, req.password) else {
        return Err(AppError::Unauthorized);
    };

    let user = state.user_service.authenticate(&username, &password).await?;
    let session = state.session_service.create(&user.id).await?;

    let jar = jar.add(session_cookie(&state.cookie_name, session.id));

    Ok((
        jar,
        Json(AuthResponse {
            message: "Login successful".to_string(),
            user: UserSummary::from(&user),
        }),
    ))
}

/// End the current session. 400 when the request carries none.
async fn logout(State(state): State<AppState>, jar: CookieJar) -> AppResult<impl IntoResponse> {
    let Some(cookie) = jar.get(&state.cookie_name) else {
        return Err(AppError::BadRequest("Not logged in".to_string()));
    };

    state.session_service.destroy(cookie.value()).await?;
    let jar = jar.remove(Cookie::from(state.cookie_name.clone()));

    Ok((jar, Json(json!({"message": "Logged out successfully"}))))
}

/// Report whether the request carries a live session.
async fn check_auth(MaybeAuthUser(user): MaybeAuthUser) -> impl IntoResponse {
    match user {
        Some(user) => (
            StatusCode::OK,
            Json(json!({
                "authenticated": true,
                "user": UserSummary::from(&user),
            })),
        ),
        None => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"authenticated": false})),
        ),
    }
}

/// Auth routes, mounted at the root.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/check-auth", get(check_auth))
}
