use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, ReviewId, UserId};

/// A user's review of a canonical local book.
/// Created once per (book, user) and never modified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    pub book_id: BookId,
    pub user_id: UserId,
    /// 1..=5
    pub rating: u8,
    pub comment: String,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Create a new Review.
    /// Callers validate input with `validate_review_input` first.
    pub fn new(book_id: BookId, user_id: UserId, rating: u8, comment: String) -> Self {
        Self {
            id: ReviewId::new(),
            book_id,
            user_id,
            rating,
            comment,
            created_at: crate::domain::now(),
        }
    }
}

/// A review joined at read time with its author and book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewDetails {
    pub review: Review,
    pub username: String,
    pub book_title: String,
    pub book_author: String,
    pub book_cover_image: Option<String>,
}
