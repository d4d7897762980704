//! Field validation rules, applied by services before any write.

use std::collections::HashSet;

use booknook_common::{AppError, AppResult};

/// Validate a username: at least 3 characters, alphanumeric/underscore
/// only, and not purely numeric.
pub fn username(value: &str) -> AppResult<()> {
    if value.len() < 3 {
        return Err(AppError::Validation(
            "Username must be at least 3 characters".to_string(),
        ));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(AppError::Validation(
            "Username may only contain letters, digits and underscores".to_string(),
        ));
    }
    if value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "Username cannot be entirely numeric".to_string(),
        ));
    }
    Ok(())
}

/// Validate a book title: non-empty after trimming.
pub fn book_title(value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation("Title is required".to_string()));
    }
    Ok(())
}

/// Validate a book author: non-empty after trimming.
pub fn book_author(value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation("Author is required".to_string()));
    }
    Ok(())
}

/// Validate a genre: at most 100 characters.
pub fn genre(value: &str) -> AppResult<()> {
    if value.len() > 100 {
        return Err(AppError::Validation(
            "Genre must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate a page count: strictly positive.
pub fn page_count(value: i32) -> AppResult<()> {
    if value <= 0 {
        return Err(AppError::Validation(
            "Page count must be positive".to_string(),
        ));
    }
    Ok(())
}

/// Validate a publication year: non-negative.
pub fn publication_year(value: i32) -> AppResult<()> {
    if value < 0 {
        return Err(AppError::Validation(
            "Publication year cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Validate a reading list name: non-empty after trimming, at most 80
/// characters.
pub fn list_name(value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation("List name is required".to_string()));
    }
    if value.len() > 80 {
        return Err(AppError::Validation(
            "List name must be at most 80 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate a rating: integer in [1, 5].
pub fn rating(value: i32) -> AppResult<()> {
    if !(1..=5).contains(&value) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".to_string(),
        ));
    }
    Ok(())
}

/// Validate review text: non-empty after trimming, at most 5000 characters.
pub fn review_text(value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation("Review text is required".to_string()));
    }
    if value.len() > 5000 {
        return Err(AppError::Validation(
            "Review text must be at most 5000 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate a content report reason: non-empty, at most 100 characters.
pub fn report_reason(value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation("Reason is required".to_string()));
    }
    if value.len() > 100 {
        return Err(AppError::Validation(
            "Reason must be at most 100 characters".to_string(),
        ));
    }
    Ok(())
}

/// Reject a submitted book id set that mentions any book twice.
pub fn no_duplicate_book_ids(ids: &[String]) -> AppResult<()> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Duplicate book id in list: {id}"
            )));
        }
    }
    Ok(())
}
