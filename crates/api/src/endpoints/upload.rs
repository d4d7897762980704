//! PDF upload and proxy endpoints.

use axum::{
    Json, Router,
    body::Body,
    extract::{Multipart, Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use booknook_common::{AppError, AppResult};
use booknook_core::UploadedPdf;

use crate::{extractors::AuthUser, middleware::AppState, response::BookDto};

/// Accept a multipart PDF upload and run the ingestion pipeline.
async fn upload_pdf(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut upload: Option<UploadedPdf> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("pdf") {
            let filename = field
                .file_name()
                .map_or_else(|| "upload.pdf".to_string(), ToString::to_string);
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?
                .to_vec();

            upload = Some(UploadedPdf { filename, data });
        }
    }

    let Some(upload) = upload else {
        return Err(AppError::BadRequest("No PDF file uploaded".to_string()));
    };

    let book = state.ingestion_service.ingest(upload).await?;

    Ok((StatusCode::CREATED, Json(BookDto::from(book))))
}

/// Stream a book's PDF through the backend, so the client never talks to
/// the storage provider directly.
async fn pdf_proxy(
    AuthUser(_user): AuthUser,
    State(state): State<AppState>,
    Path(book_id): Path<String>,
) -> AppResult<Response> {
    let book = state.book_service.get(&book_id).await?;

    let Some(pdf_url) = book.pdf_url else {
        return Err(AppError::NotFound("PDF not found".to_string()));
    };

    let upstream = state
        .http_client
        .get(&pdf_url)
        .send()
        .await
        .map_err(|e| AppError::ExternalService(format!("Failed to fetch PDF: {e}")))?;

    if !upstream.status().is_success() {
        return Err(AppError::ExternalService(format!(
            "Failed to fetch PDF: {}",
            upstream.status()
        )));
    }

    let content_type = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/pdf")
        .to_string();

    let body = Body::from_stream(upstream.bytes_stream());

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .header(
            header::CONTENT_DISPOSITION,
            format!("inline; filename=\"{}.pdf\"", book.title),
        )
        .body(body)
        .map_err(|e| AppError::Internal(e.to_string()))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/upload-pdf", post(upload_pdf))
        .route("/pdf-proxy/{book_id}", get(pdf_proxy))
}
