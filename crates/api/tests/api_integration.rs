//! API integration tests.
//!
//! These run the full router against a mock database. Paths that would
//! hit the database need a session cookie first, so the tests here focus
//! on routing, the auth guard and the error envelope.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::redundant_clone)]

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use booknook_api::{AppState, router};
use booknook_common::{NoOpStorage, StorageBackend};
use booknook_core::{
    BookService, IngestionService, ReadingListService, ReadingProgressService, ReportService,
    ReviewService, SearchService, SessionService, UserService,
};
use booknook_db::repositories::{
    BookRepository, ContentReportRepository, ReadingListRepository, ReadingProgressRepository,
    ReviewRepository, SessionRepository, UserRepository,
};
use http_body_util::BodyExt;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase};
use tower::ServiceExt;

fn create_mock_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn state_with_db(db: DatabaseConnection) -> AppState {
    let db = Arc::new(db);

    let user_repo = UserRepository::new(Arc::clone(&db));
    let session_repo = SessionRepository::new(Arc::clone(&db));
    let book_repo = BookRepository::new(Arc::clone(&db));
    let review_repo = ReviewRepository::new(Arc::clone(&db));
    let list_repo = ReadingListRepository::new(Arc::clone(&db));
    let progress_repo = ReadingProgressRepository::new(Arc::clone(&db));
    let report_repo = ContentReportRepository::new(Arc::clone(&db));

    let storage: Arc<dyn StorageBackend> = Arc::new(NoOpStorage);

    AppState {
        user_service: UserService::new(user_repo.clone()),
        session_service: SessionService::new(session_repo, user_repo.clone(), 30),
        book_service: BookService::new(book_repo.clone()),
        review_service: ReviewService::new(review_repo, user_repo.clone(), book_repo.clone()),
        reading_list_service: ReadingListService::new(list_repo, user_repo, book_repo.clone()),
        progress_service: ReadingProgressService::new(progress_repo),
        report_service: ReportService::new(report_repo, book_repo.clone()),
        ingestion_service: IngestionService::new(book_repo.clone(), storage),
        search_service: SearchService::new(book_repo),
        http_client: reqwest::Client::new(),
        cookie_name: "booknook_session".to_string(),
        db,
    }
}

fn create_test_state() -> AppState {
    state_with_db(create_mock_db())
}

fn create_test_router() -> Router {
    router(create_test_state())
}

async fn body_json(body: Body) -> serde_json::Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_root_returns_welcome() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["message"], "Welcome to the Book App API!");
}

#[tokio::test]
async fn test_health_returns_ok() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_unknown_endpoint_returns_404_with_hint() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/nonexistent/endpoint")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response.into_body()).await;
    assert_eq!(
        json["error"],
        "The requested endpoint was not found, check the url for any typos"
    );
}

#[tokio::test]
async fn test_books_requires_session() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/books")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_reading_lists_requires_session() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/reading-lists")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_books_preflight_bypasses_guard() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/books")
                .method("OPTIONS")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Pre-flight must not be rejected as unauthenticated.
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_check_auth_without_session() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/check-auth")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["authenticated"], false);
}

#[tokio::test]
async fn test_logout_without_session_is_bad_request() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/logout")
                .method("POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_missing_fields_returns_422() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/signup")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"username":"alice"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_search_without_query_returns_empty_list() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_search_pdfs_without_query_returns_empty_list() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/search-pdfs")
                .method("GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response.into_body()).await;
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_upload_pdf_requires_session() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/upload-pdf")
                .method("POST")
                .header("Content-Type", "multipart/form-data; boundary=x")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_large_upload_reaches_ingestion_pipeline() {
    // A 3MB body sits above axum's 2MB default body limit but below the
    // 10MB upload cap; it must reach the PDF parser rather than be
    // rejected during multipart parsing.
    let now = chrono::Utc::now();
    let session = booknook_db::entities::session::Model {
        id: "sessiontoken".to_string(),
        user_id: "user1".to_string(),
        created_at: now.fixed_offset(),
        expires_at: (now + chrono::Duration::days(1)).fixed_offset(),
    };
    let user = booknook_db::entities::user::Model {
        id: "user1".to_string(),
        username: "uploader".to_string(),
        password_hash: "$argon2id$stub".to_string(),
        created_at: now.fixed_offset(),
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![session]])
        .append_query_results([vec![user]])
        .into_connection();
    let app = router(state_with_db(db));

    let boundary = "XBOUNDARY";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"pdf\"; filename=\"big.pdf\"\r\n",
    );
    body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
    body.extend_from_slice(&vec![0x41u8; 3 * 1024 * 1024]);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/upload-pdf")
                .method("POST")
                .header(
                    "Content-Type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .header("Cookie", "booknook_session=sessiontoken")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    // Garbage bytes fail PDF parsing, proving the pipeline ran.
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response.into_body()).await;
    assert_eq!(json["error"]["code"], "METADATA_EXTRACTION_ERROR");
}

#[tokio::test]
async fn test_report_content_requires_session() {
    let app = create_test_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/report-content")
                .method("POST")
                .header("Content-Type", "application/json")
                .body(Body::from(r#"{"book_id":"b1","reason":"spam"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
