//! Core business logic for booknook-rs.

pub mod pdf;
pub mod services;
pub mod validate;

pub use services::*;
