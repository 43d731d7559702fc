// src/repositories/book_repository.rs
//
// Catalog store: locally known books, keyed by internal id with a unique
// secondary index on the provider id.

use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::sync::Arc;

use crate::db::{format_timestamp, is_unique_violation, parse_timestamp, with_connection, ConnectionPool};
use crate::domain::{validate_book, Book, BookId, NewBook, Page, UserId};
use crate::error::{AppError, AppResult};

const BOOK_COLUMNS: &str = "id, external_id, title, author, description, genre, isbn,
     publisher, language, published_date, cover_image, page_count, added_by, created_at";

const DATE_FORMAT: &str = "%Y-%m-%d";

#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>>;
    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<Book>>;
    /// Insert a new book. Fails with `DuplicateExternalId` when another
    /// row already carries the same external id.
    async fn create(&self, book: NewBook) -> AppResult<Book>;
    /// Newest first
    async fn list(&self, offset: u64, limit: u64) -> AppResult<Page<Book>>;
    async fn count(&self) -> AppResult<u64>;
}

pub struct SqliteBookRepository {
    pool: Arc<ConnectionPool>,
}

impl SqliteBookRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    /// Map database row to Book - returns rusqlite::Error for query_map compatibility
    fn row_to_book(row: &Row) -> Result<Book, rusqlite::Error> {
        let id = row
            .get::<_, String>("id")?
            .parse::<BookId>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let published_date = row
            .get::<_, Option<String>>("published_date")?
            .map(|s| {
                NaiveDate::parse_from_str(&s, DATE_FORMAT)
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let page_count = u32::try_from(row.get::<_, i64>("page_count")?)
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;

        let added_by = row
            .get::<_, Option<String>>("added_by")?
            .map(|s| {
                s.parse::<UserId>()
                    .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
            })
            .transpose()?;

        let created_at = parse_timestamp(&row.get::<_, String>("created_at")?)?;

        Ok(Book {
            id,
            external_id: row.get("external_id")?,
            title: row.get("title")?,
            author: row.get("author")?,
            description: row.get("description")?,
            genre: row.get("genre")?,
            isbn: row.get("isbn")?,
            publisher: row.get("publisher")?,
            language: row.get("language")?,
            published_date,
            cover_image: row.get("cover_image")?,
            page_count,
            added_by,
            created_at,
        })
    }

    fn insert(conn: &Connection, book: &Book) -> AppResult<()> {
        let result = conn.execute(
            &format!(
                "INSERT INTO books ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                BOOK_COLUMNS
            ),
            params![
                book.id.to_string(),
                book.external_id,
                book.title,
                book.author,
                book.description,
                book.genre,
                book.isbn,
                book.publisher,
                book.language,
                book.published_date.map(|d| d.format(DATE_FORMAT).to_string()),
                book.cover_image,
                i64::from(book.page_count),
                book.added_by.map(|id| id.to_string()),
                format_timestamp(&book.created_at),
            ],
        );

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateExternalId(
                book.external_id.clone().unwrap_or_default(),
            )),
            Err(e) => Err(AppError::Database(e)),
        }
    }
}

#[async_trait]
impl BookRepository for SqliteBookRepository {
    async fn find_by_id(&self, id: BookId) -> AppResult<Option<Book>> {
        with_connection(&self.pool, move |conn| {
            let book = conn
                .query_row(
                    &format!("SELECT {} FROM books WHERE id = ?1", BOOK_COLUMNS),
                    params![id.to_string()],
                    Self::row_to_book,
                )
                .optional()?;
            Ok(book)
        })
        .await
    }

    async fn find_by_external_id(&self, external_id: &str) -> AppResult<Option<Book>> {
        let external_id = external_id.to_string();
        with_connection(&self.pool, move |conn| {
            let book = conn
                .query_row(
                    &format!("SELECT {} FROM books WHERE external_id = ?1", BOOK_COLUMNS),
                    params![external_id],
                    Self::row_to_book,
                )
                .optional()?;
            Ok(book)
        })
        .await
    }

    async fn create(&self, new_book: NewBook) -> AppResult<Book> {
        let book = Book::create(new_book);
        validate_book(&book)?;

        with_connection(&self.pool, move |conn| {
            Self::insert(conn, &book)?;
            Ok(book)
        })
        .await
    }

    async fn list(&self, offset: u64, limit: u64) -> AppResult<Page<Book>> {
        with_connection(&self.pool, move |conn| {
            let total: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;

            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM books
                 ORDER BY created_at DESC, rowid DESC
                 LIMIT ?1 OFFSET ?2",
                BOOK_COLUMNS
            ))?;

            let items = stmt
                .query_map(params![to_sql_int(limit), to_sql_int(offset)], Self::row_to_book)?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Page {
                items,
                total: total.max(0) as u64,
                offset,
                limit,
            })
        })
        .await
    }

    async fn count(&self) -> AppResult<u64> {
        with_connection(&self.pool, |conn| {
            let total: i64 = conn.query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
            Ok(total.max(0) as u64)
        })
        .await
    }
}

/// SQLite integers are signed; saturate instead of wrapping
pub(crate) fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
