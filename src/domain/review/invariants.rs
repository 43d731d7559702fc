use crate::domain::{DomainError, DomainResult};

pub const RATING_MIN: i64 = 1;
pub const RATING_MAX: i64 = 5;
pub const COMMENT_MIN_CHARS: usize = 10;
pub const COMMENT_MAX_CHARS: usize = 500;

/// Validates review input and returns the normalized (rating, comment).
///
/// Comment length is counted in characters after trimming surrounding
/// whitespace.
pub fn validate_review_input(rating: i64, comment: &str) -> DomainResult<(u8, String)> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(DomainError::InvariantViolation(format!(
            "Rating must be between {} and {}, got {}",
            RATING_MIN, RATING_MAX, rating
        )));
    }

    let comment = comment.trim();
    let length = comment.chars().count();
    if !(COMMENT_MIN_CHARS..=COMMENT_MAX_CHARS).contains(&length) {
        return Err(DomainError::InvariantViolation(format!(
            "Comment must be between {} and {} characters, got {}",
            COMMENT_MIN_CHARS, COMMENT_MAX_CHARS, length
        )));
    }

    // Range checked above
    Ok((rating as u8, comment.to_string()))
}

/// Invariants that must hold true for the Review domain:
///
/// 1. Every review references an existing canonical Book
/// 2. (book_id, user_id) is unique (storage-enforced)
/// 3. Rating is within 1..=5
/// 4. Comment is 10..=500 characters
/// 5. Reviews are never updated or deleted
