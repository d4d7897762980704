//! BookNook server entry point.

use std::sync::Arc;

use axum::http::{HeaderValue, Method, header};
use booknook_api::{AppState, MAX_BODY_BYTES, router};
use booknook_common::{Config, LocalStorage, StorageBackend};
use booknook_core::{
    BookService, IngestionService, ReadingListService, ReadingProgressService, ReportService,
    ReviewService, SearchService, SessionService, UserService,
};
use booknook_db::repositories::{
    BookRepository, ContentReportRepository, ReadingListRepository, ReadingProgressRepository,
    ReviewRepository, SessionRepository, UserRepository,
};
use tokio::signal;
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Waits for a shutdown signal (SIGINT or SIGTERM).
///
/// On Unix systems, this listens for both SIGINT (Ctrl+C) and SIGTERM.
/// On Windows, this only listens for Ctrl+C.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received SIGINT, initiating graceful shutdown...");
        },
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        },
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "booknook=debug,tower_http=debug".into());

    if json {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer().json())
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(tracing_subscriber::fmt::layer())
            .with(filter)
            .init();
    }
}

/// Build the CORS layer from configured origins. An empty origin list
/// allows any origin, but then credentials cannot be used.
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers = [header::CONTENT_TYPE, header::AUTHORIZATION];

    if allowed_origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(methods)
            .allow_headers(headers);
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::load()?;
    init_tracing(config.log.json);

    info!("Starting BookNook server...");

    // Connect to database
    let db = booknook_db::init(&config).await?;
    info!("Connected to database");

    // Run migrations
    info!("Running database migrations...");
    booknook_db::migrate(&db).await?;
    info!("Migrations completed");

    // Initialize repositories
    let db = Arc::new(db);
    let user_repo = UserRepository::new(Arc::clone(&db));
    let session_repo = SessionRepository::new(Arc::clone(&db));
    let book_repo = BookRepository::new(Arc::clone(&db));
    let review_repo = ReviewRepository::new(Arc::clone(&db));
    let list_repo = ReadingListRepository::new(Arc::clone(&db));
    let progress_repo = ReadingProgressRepository::new(Arc::clone(&db));
    let report_repo = ContentReportRepository::new(Arc::clone(&db));

    // Initialize storage
    let storage: Arc<dyn StorageBackend> = Arc::new(LocalStorage::new(
        config.storage.base_path.clone(),
        config.storage.base_url.clone(),
    ));

    // Initialize services
    let user_service = UserService::new(user_repo.clone());
    let session_service = SessionService::new(
        session_repo,
        user_repo.clone(),
        config.session.ttl_days,
    );
    let book_service = BookService::new(book_repo.clone());
    let review_service = ReviewService::new(review_repo, user_repo.clone(), book_repo.clone());
    let reading_list_service = ReadingListService::new(list_repo, user_repo, book_repo.clone());
    let progress_service = ReadingProgressService::new(progress_repo);
    let report_service = ReportService::new(report_repo, book_repo.clone());
    let ingestion_service = IngestionService::new(book_repo.clone(), storage);
    let search_service = SearchService::new(book_repo);

    // Create app state
    let state = AppState {
        user_service,
        session_service,
        book_service,
        review_service,
        reading_list_service,
        progress_service,
        report_service,
        ingestion_service,
        search_service,
        http_client: reqwest::Client::new(),
        cookie_name: config.session.cookie_name.clone(),
        db,
    };

    // Build router
    let app = router(state)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.server.allowed_origins));

    // Start server with graceful shutdown
    let addr = format!("{}:{}", config.server.host, config.server.port);
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
