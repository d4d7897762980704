//! Database entities.

pub mod book;
pub mod content_report;
pub mod reading_list;
pub mod reading_list_book;
pub mod reading_progress;
pub mod review;
pub mod session;
pub mod user;

pub use book::Entity as Book;
pub use content_report::Entity as ContentReport;
pub use reading_list::Entity as ReadingList;
pub use reading_list_book::Entity as ReadingListBook;
pub use reading_progress::Entity as ReadingProgress;
pub use review::Entity as Review;
pub use session::Entity as Session;
pub use user::Entity as User;
