//! Root, health and schema-bootstrap endpoints.

use axum::{Json, Router, extract::State, routing::get};
use booknook_common::AppResult;
use serde_json::{Value, json};

use crate::middleware::AppState;

async fn index() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Book App API!" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Run pending migrations on demand. Useful for first deploys where the
/// database exists but the schema does not.
async fn init_db(State(state): State<AppState>) -> AppResult<Json<Value>> {
    booknook_db::migrate(&state.db).await?;

    Ok(Json(json!({
        "message": "Database tables created successfully!"
    })))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/init-db", get(init_db))
}
