// src/domain/book/external.rs
//
// Book metadata as reported by the external provider.
// Transient: never persisted as-is, only translated into a NewBook.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entity::NewBook;
use crate::domain::ids::UserId;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const UNKNOWN_PUBLISHER: &str = "Unknown Publisher";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalBookRecord {
    pub external_id: String,
    pub title: String,
    pub author: String,
    pub description: String,
    pub genre: String,
    pub isbn: String,
    pub publisher: String,
    pub language: String,
    pub published_date: Option<NaiveDate>,
    pub cover_image: Option<String>,
    pub page_count: u32,
}

impl ExternalBookRecord {
    /// Translate into catalog creation input, carrying the external id
    pub fn to_new_book(&self, added_by: Option<UserId>) -> NewBook {
        NewBook {
            external_id: Some(self.external_id.clone()),
            title: self.title.clone(),
            author: self.author.clone(),
            description: Some(self.description.clone()),
            genre: Some(self.genre.clone()),
            isbn: Some(self.isbn.clone()),
            publisher: Some(self.publisher.clone()),
            language: Some(self.language.clone()),
            published_date: self.published_date,
            cover_image: self.cover_image.clone(),
            page_count: Some(self.page_count),
            added_by,
        }
    }
}
