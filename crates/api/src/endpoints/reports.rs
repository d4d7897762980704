//! Content report endpoint.

use axum::{Json, Router, extract::State, routing::post};
use booknook_common::{AppError, AppResult};
use serde::Deserialize;

use crate::{extractors::AuthUser, middleware::AppState, response::ReportAck};

#[derive(Debug, Deserialize)]
struct ReportRequest {
    book_id: Option<String>,
    reason: Option<String>,
    details: Option<String>,
}

/// File a content report against a book.
async fn report_content(
    AuthUser(user): AuthUser,
    State(state): State<AppState>,
    Json(req): Json<ReportRequest>,
) -> AppResult<Json<ReportAck>> {
    let (Some(book_id), Some(reason)) = (req.book_id, req.reason) else {
        return Err(AppError::BadRequest("Missing required fields".to_string()));
    };

    let report = state
        .report_service
        .file_report(&user.id, &book_id, &reason, req.details)
        .await?;

    Ok(Json(ReportAck::submitted(&report)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/report-content", post(report_content))
}
