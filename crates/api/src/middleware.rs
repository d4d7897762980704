//! API middleware.

#![allow(missing_docs)]

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use booknook_common::AppError;
use booknook_core::{
    BookService, IngestionService, ReadingListService, ReadingProgressService, ReportService,
    ReviewService, SearchService, SessionService, UserService,
};
use booknook_db::entities::user;
use sea_orm::DatabaseConnection;

/// Application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub session_service: SessionService,
    pub book_service: BookService,
    pub review_service: ReviewService,
    pub reading_list_service: ReadingListService,
    pub progress_service: ReadingProgressService,
    pub report_service: ReportService,
    pub ingestion_service: IngestionService,
    pub search_service: SearchService,
    /// Client for fetching PDFs through the proxy endpoint.
    pub http_client: reqwest::Client,
    /// Name of the session cookie.
    pub cookie_name: String,
    /// Raw connection, used by the schema-init endpoint.
    pub db: Arc<DatabaseConnection>,
}

/// Session middleware: resolve the session cookie to a user and stash the
/// model in request extensions. Requests without a live session pass
/// through unauthenticated.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let jar = CookieJar::from_headers(req.headers());

    if let Some(cookie) = jar.get(&state.cookie_name)
        && let Ok(Some(user)) = state.session_service.resolve(cookie.value()).await
    {
        req.extensions_mut().insert(user);
    }

    next.run(req).await
}

/// Guard for the protected path prefixes (`/books`, `/reading-lists`).
/// Rejects unauthenticated requests with 401 before the handler runs;
/// CORS pre-flight passes through unconditionally.
pub async fn protected_prefix_guard(req: Request<Body>, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        return next.run(req).await;
    }

    if req.extensions().get::<user::Model>().is_none() {
        return AppError::Unauthorized.into_response();
    }

    next.run(req).await
}
