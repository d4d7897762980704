//! HTTP API layer for booknook-rs.
//!
//! - **Endpoints**: the JSON REST surface (auth, catalog, reviews, lists,
//!   progress, reports, search, uploads)
//! - **Extractors**: session-backed authentication
//! - **Middleware**: session resolution and the protected-prefix guard
//!
//! Built on Axum 0.8 with a Tower middleware stack.

pub mod endpoints;
pub mod extractors;
pub mod middleware;
pub mod response;

pub use endpoints::{MAX_BODY_BYTES, router};
pub use middleware::AppState;
