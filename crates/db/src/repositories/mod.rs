//! Repositories for database access.

mod book;
mod content_report;
mod reading_list;
mod reading_progress;
mod review;
mod session;
mod user;

pub use book::BookRepository;
pub use content_report::ContentReportRepository;
pub use reading_list::ReadingListRepository;
pub use reading_progress::ReadingProgressRepository;
pub use review::ReviewRepository;
pub use session::SessionRepository;
pub use user::UserRepository;
