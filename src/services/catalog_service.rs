// src/services/catalog_service.rs
//
// Catalog Service - browsing the local catalog, admin additions and
// provider search

use regex::Regex;
use std::sync::{Arc, OnceLock};

use crate::domain::{Book, NewBook, Page, User};
use crate::error::{AppError, AppResult};
use crate::integrations::{BookCatalogGateway, ExternalSearchResult};
use crate::repositories::BookRepository;

pub const DEFAULT_PAGE_SIZE: u64 = 10;
pub const MAX_PAGE_SIZE: u64 = 50;

pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// Google Books caps `maxResults` at 40
pub const MAX_SEARCH_LIMIT: u32 = 40;

const TITLE_MAX: usize = 200;
const AUTHOR_MAX: usize = 100;

fn isbn_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[\d-]{10,17}$").expect("valid isbn regex"))
}

/// Admin-supplied book data
#[derive(Debug, Clone, Default)]
pub struct NewBookInput {
    pub title: String,
    pub author: String,
    pub description: Option<String>,
    pub genre: Option<String>,
    pub isbn: Option<String>,
    pub publisher: Option<String>,
    pub language: Option<String>,
    pub published_date: Option<chrono::NaiveDate>,
    pub cover_image: Option<String>,
    pub page_count: Option<u32>,
}

/// Convert 1-based `page`/`limit` into an offset window, applying defaults
pub fn page_window(page: Option<u64>, limit: Option<u64>) -> AppResult<(u64, u64)> {
    let page = page.unwrap_or(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE);

    if page < 1 {
        return Err(AppError::Validation("page must be at least 1".to_string()));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&limit) {
        return Err(AppError::Validation(format!(
            "limit must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }

    Ok(((page - 1).saturating_mul(limit), limit))
}

pub struct CatalogService {
    book_repo: Arc<dyn BookRepository>,
    gateway: Arc<dyn BookCatalogGateway>,
}

impl CatalogService {
    pub fn new(book_repo: Arc<dyn BookRepository>, gateway: Arc<dyn BookCatalogGateway>) -> Self {
        Self { book_repo, gateway }
    }

    /// Newest-first page of local books
    pub async fn list_books(&self, page: Option<u64>, limit: Option<u64>) -> AppResult<Page<Book>> {
        let (offset, limit) = page_window(page, limit)?;
        self.book_repo.list(offset, limit).await
    }

    /// Add a purely local book (no external id). Admins only.
    pub async fn add_local_book(&self, actor: &User, input: NewBookInput) -> AppResult<Book> {
        if !actor.is_admin() {
            return Err(AppError::Forbidden);
        }

        let title = input.title.trim();
        let author = input.author.trim();
        if title.is_empty() || title.chars().count() > TITLE_MAX {
            return Err(AppError::Validation(format!(
                "Title is required and cannot exceed {} characters",
                TITLE_MAX
            )));
        }
        if author.is_empty() || author.chars().count() > AUTHOR_MAX {
            return Err(AppError::Validation(format!(
                "Author is required and cannot exceed {} characters",
                AUTHOR_MAX
            )));
        }
        let isbn = input.isbn.map(|i| i.trim().to_string()).filter(|i| !i.is_empty());
        if let Some(isbn) = &isbn {
            if !isbn_pattern().is_match(isbn) {
                return Err(AppError::Validation("Invalid ISBN format".to_string()));
            }
        }

        let book = self
            .book_repo
            .create(NewBook {
                external_id: None,
                title: title.to_string(),
                author: author.to_string(),
                description: input.description,
                genre: input.genre,
                isbn,
                publisher: input.publisher,
                language: input.language,
                published_date: input.published_date,
                cover_image: input.cover_image,
                page_count: input.page_count,
                added_by: Some(actor.id),
            })
            .await?;

        log::info!("User {} added local book {} ({})", actor.id, book.id, book.title);
        Ok(book)
    }

    /// Provider search. Nothing is written.
    pub async fn search_external(
        &self,
        query: &str,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> AppResult<ExternalSearchResult> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::Validation("Search query is required".to_string()));
        }
        let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
        if !(1..=MAX_SEARCH_LIMIT).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {}",
                MAX_SEARCH_LIMIT
            )));
        }

        self.gateway.search(query, limit, offset.unwrap_or(0)).await
    }
}
