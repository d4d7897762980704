//! Document ingestion pipeline: store an uploaded PDF, extract its
//! metadata and preview text, persist the catalog record, refresh search.

use std::sync::Arc;

use booknook_common::{generate_storage_key, AppError, AppResult, IdGenerator, StorageBackend};
use booknook_db::{entities::book, repositories::BookRepository};
use sea_orm::Set;
use tracing::info;

use crate::pdf::ParsedPdf;

/// Maximum accepted PDF upload size: 10 MB.
pub const MAX_PDF_SIZE: usize = 10 * 1024 * 1024;

/// An upload handed to the pipeline.
#[derive(Debug)]
pub struct UploadedPdf {
    /// Filename as declared by the client.
    pub filename: String,
    /// Raw bytes.
    pub data: Vec<u8>,
}

/// Runs the sequential ingestion steps. A failure at any step aborts the
/// rest; no partial Book row is left behind because the insert is last.
#[derive(Clone)]
pub struct IngestionService {
    book_repo: BookRepository,
    storage: Arc<dyn StorageBackend>,
    id_gen: IdGenerator,
}

impl IngestionService {
    /// Create a new ingestion service.
    #[must_use]
    pub fn new(book_repo: BookRepository, storage: Arc<dyn StorageBackend>) -> Self {
        Self {
            book_repo,
            storage,
            id_gen: IdGenerator::new(),
        }
    }

    /// Ingest an uploaded PDF, returning the created book.
    pub async fn ingest(&self, upload: UploadedPdf) -> AppResult<book::Model> {
        if upload.data.is_empty() {
            return Err(AppError::BadRequest("Uploaded file is empty".to_string()));
        }
        if upload.data.len() > MAX_PDF_SIZE {
            return Err(AppError::BadRequest(
                "File too large. Maximum size is 10MB.".to_string(),
            ));
        }

        // Step 1: blob storage
        let key = generate_storage_key("pdf_books", &upload.data, &upload.filename);
        let stored = self
            .storage
            .upload(&key, &upload.data, "application/pdf")
            .await?;

        // Step 2: metadata
        let parsed = ParsedPdf::parse(&upload.data)?;
        let metadata = parsed.metadata();

        let title = metadata
            .title
            .unwrap_or_else(|| filename_stem(&upload.filename));
        let author = metadata.author.unwrap_or_else(|| "Unknown".to_string());

        // Step 3: preview text
        let preview = parsed.extract_preview();

        // Step 4: catalog record
        let now = chrono::Utc::now();
        let model = book::ActiveModel {
            id: Set(self.id_gen.generate()),
            title: Set(title),
            author: Set(author),
            page_count: Set(Some(metadata.page_count)),
            pdf_url: Set(Some(stored.url)),
            is_pdf: Set(true),
            file_size: Set(Some(i64::try_from(stored.size).unwrap_or(i64::MAX))),
            content_preview: Set(if preview.is_empty() {
                None
            } else {
                Some(preview)
            }),
            upload_date: Set(Some(now.into())),
            created_at: Set(now.into()),
            ..Default::default()
        };

        let created = self.book_repo.create(model).await?;

        // Step 5: make it searchable immediately
        self.book_repo.refresh_search_index().await?;

        info!(
            book_id = %created.id,
            title = %created.title,
            size = upload.data.len(),
            "Ingested uploaded PDF"
        );

        Ok(created)
    }
}

/// Filename with its extension stripped, used as the title fallback.
fn filename_stem(filename: &str) -> String {
    filename
        .rfind('.')
        .filter(|&pos| pos > 0)
        .map_or(filename, |pos| &filename[..pos])
        .to_string()
}
