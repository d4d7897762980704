//! Business logic services.

#![allow(missing_docs)]

pub mod book;
pub mod ingestion;
pub mod reading_list;
pub mod reading_progress;
pub mod report;
pub mod review;
pub mod search;
pub mod session;
pub mod user;

pub use book::{BookService, CreateBookInput};
pub use ingestion::{IngestionService, UploadedPdf, MAX_PDF_SIZE};
pub use reading_list::{CreateReadingListInput, ListBookEntry, ReadingListService, UpdateReadingListInput};
pub use reading_progress::{ProgressSnapshot, ReadingProgressService};
pub use report::ReportService;
pub use review::{CreateReviewInput, ReviewService, UpdateReviewInput};
pub use search::SearchService;
pub use session::SessionService;
pub use user::UserService;
