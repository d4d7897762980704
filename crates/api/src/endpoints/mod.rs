//! API endpoints.

mod auth;
mod books;
mod progress;
mod reading_lists;
mod reports;
mod reviews;
mod search;
mod system;
mod upload;
mod users;

use axum::{
    Json, Router, extract::DefaultBodyLimit, http::StatusCode, middleware as axum_middleware,
};
use serde_json::json;

use crate::middleware::{AppState, protected_prefix_guard, session_middleware};

/// Largest accepted request body: the 10MB PDF cap plus multipart
/// boundary overhead. Raises axum's 2MB default, which would otherwise
/// reject valid uploads before the ingestion pipeline sees them.
pub const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

/// Build the full application router. The caller layers the session
/// middleware (which needs the state) on top.
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/books", books::router())
        .nest("/reading-lists", reading_lists::router())
        .layer(axum_middleware::from_fn(protected_prefix_guard));

    Router::new()
        .merge(system::router())
        .merge(auth::router())
        .merge(upload::router())
        .merge(search::router())
        .nest("/users", users::router())
        .nest("/reviews", reviews::router())
        .nest("/reading-progress", progress::router())
        .merge(reports::router())
        .merge(protected)
        .fallback(fallback_404)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            session_middleware,
        ))
        .with_state(state)
}

/// Uniform JSON body for unmatched routes.
async fn fallback_404() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "The requested endpoint was not found, check the url for any typos"
        })),
    )
}
