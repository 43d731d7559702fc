use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{BookId, UserId};

pub const DEFAULT_DESCRIPTION: &str = "No description available";
pub const DEFAULT_GENRE: &str = "Uncategorized";
pub const DEFAULT_ISBN: &str = "Unknown";
pub const DEFAULT_LANGUAGE: &str = "en";

/// A book known to the local catalog.
/// This is the canonical entity every review points at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Internal immutable identifier, assigned by the catalog store
    pub id: BookId,

    /// Provider identifier (Google Books volume id) when the book was imported.
    /// Unique across the catalog and never changed after creation.
    pub external_id: Option<String>,

    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub isbn: String,
    pub publisher: Option<String>,
    pub language: String,
    pub published_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub page_count: u32,

    /// User who added or imported the book, if known
    pub added_by: Option<UserId>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// Input for creating a [`Book`].
/// Optional descriptive fields fall back to the catalog defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewBook {
    pub external_id: Option<String>,
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub published_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub page_count: Option<u32>,
    pub added_by: Option<UserId>,
}

impl Book {
    /// Build a fresh Book from creation input.
    /// Identity and creation time are assigned here and never change.
    pub fn create(new: NewBook) -> Self {
        Self {
            id: BookId::new(),
            external_id: new.external_id.map(|id| id.trim().to_string()),
            title: new.title.trim().to_string(),
            author: new.author.trim().to_string(),
            description: non_blank_or(new.description, DEFAULT_DESCRIPTION),
            genre: non_blank_or(new.genre, DEFAULT_GENRE),
            isbn: non_blank_or(new.isbn, DEFAULT_ISBN),
            publisher: new.publisher.filter(|p| !p.trim().is_empty()),
            language: non_blank_or(new.language, DEFAULT_LANGUAGE),
            published_date: new.published_date,
            cover_image: new.cover_image.filter(|c| !c.trim().is_empty()),
            page_count: new.page_count.unwrap_or(0),
            added_by: new.added_by,
            created_at: crate::domain::now(),
        }
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => default.to_string(),
    }
}
