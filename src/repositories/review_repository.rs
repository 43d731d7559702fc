// src/repositories/review_repository.rs

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use std::sync::Arc;

use super::book_repository::to_sql_int;
use crate::db::{
    format_timestamp, is_foreign_key_violation, is_unique_violation, parse_timestamp,
    with_connection, ConnectionPool,
};
use crate::domain::{BookId, Page, Review, ReviewDetails, ReviewId, UserId};
use crate::error::{AppError, AppResult};

/// Which reviews to list. At least one side must be set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewFilter {
    pub book_id: Option<BookId>,
    pub user_id: Option<UserId>,
}

impl ReviewFilter {
    pub fn is_empty(&self) -> bool {
        self.book_id.is_none() && self.user_id.is_none()
    }
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn find_by_book_and_user(&self, book_id: BookId, user_id: UserId)
        -> AppResult<Option<Review>>;

    /// Fails with `DuplicateReview` when the (book, user) pair already has a
    /// review and with `BookNotFound` when the book row does not exist.
    async fn create(&self, review: Review) -> AppResult<Review>;

    /// Review joined with its author's username and the book summary
    async fn find_details(&self, id: ReviewId) -> AppResult<Option<ReviewDetails>>;

    /// Newest first. An empty filter is rejected with `InvalidFilter`.
    async fn list(&self, filter: ReviewFilter, offset: u64, limit: u64)
        -> AppResult<Page<ReviewDetails>>;
}

pub struct SqliteReviewRepository {
    pool: Arc<ConnectionPool>,
}

const DETAILS_SELECT: &str = "SELECT r.id, r.book_id, r.user_id, r.rating, r.comment, r.created_at,
            u.username, b.title, b.author, b.cover_image
     FROM reviews r
     JOIN users u ON u.id = r.user_id
     JOIN books b ON b.id = r.book_id";

impl SqliteReviewRepository {
    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    fn row_to_review(row: &Row) -> Result<Review, rusqlite::Error> {
        let id = row
            .get::<_, String>("id")?
            .parse::<ReviewId>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let book_id = row
            .get::<_, String>("book_id")?
            .parse::<BookId>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let user_id = row
            .get::<_, String>("user_id")?
            .parse::<UserId>()
            .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?;
        let rating: i64 = row.get("rating")?;

        Ok(Review {
            id,
            book_id,
            user_id,
            rating: u8::try_from(rating)
                .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))?,
            comment: row.get("comment")?,
            created_at: parse_timestamp(&row.get::<_, String>("created_at")?)?,
        })
    }

    fn row_to_details(row: &Row) -> Result<ReviewDetails, rusqlite::Error> {
        Ok(ReviewDetails {
            review: Self::row_to_review(row)?,
            username: row.get("username")?,
            book_title: row.get("title")?,
            book_author: row.get("author")?,
            book_cover_image: row.get("cover_image")?,
        })
    }
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepository {
    async fn find_by_book_and_user(
        &self,
        book_id: BookId,
        user_id: UserId,
    ) -> AppResult<Option<Review>> {
        with_connection(&self.pool, move |conn| {
            let review = conn
                .query_row(
                    "SELECT id, book_id, user_id, rating, comment, created_at
                     FROM reviews WHERE book_id = ?1 AND user_id = ?2",
                    params![book_id.to_string(), user_id.to_string()],
                    Self::row_to_review,
                )
                .optional()?;
            Ok(review)
        })
        .await
    }

    async fn create(&self, review: Review) -> AppResult<Review> {
        with_connection(&self.pool, move |conn| {
            let result = conn.execute(
                "INSERT INTO reviews (id, book_id, user_id, rating, comment, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    review.id.to_string(),
                    review.book_id.to_string(),
                    review.user_id.to_string(),
                    i64::from(review.rating),
                    review.comment,
                    format_timestamp(&review.created_at),
                ],
            );

            match result {
                Ok(_) => Ok(review),
                Err(e) if is_unique_violation(&e) => Err(AppError::DuplicateReview),
                Err(e) if is_foreign_key_violation(&e) => Err(AppError::BookNotFound),
                Err(e) => Err(AppError::Database(e)),
            }
        })
        .await
    }

    async fn find_details(&self, id: ReviewId) -> AppResult<Option<ReviewDetails>> {
        with_connection(&self.pool, move |conn| {
            let details = conn
                .query_row(
                    &format!("{} WHERE r.id = ?1", DETAILS_SELECT),
                    params![id.to_string()],
                    Self::row_to_details,
                )
                .optional()?;
            Ok(details)
        })
        .await
    }

    async fn list(
        &self,
        filter: ReviewFilter,
        offset: u64,
        limit: u64,
    ) -> AppResult<Page<ReviewDetails>> {
        if filter.is_empty() {
            return Err(AppError::InvalidFilter);
        }

        with_connection(&self.pool, move |conn| {
            // NULL parameters disable their side of the filter
            let book_id = filter.book_id.map(|id| id.to_string());
            let user_id = filter.user_id.map(|id| id.to_string());
            let predicate = "(?1 IS NULL OR r.book_id = ?1) AND (?2 IS NULL OR r.user_id = ?2)";

            let total: i64 = conn.query_row(
                &format!("SELECT COUNT(*) FROM reviews r WHERE {}", predicate),
                params![book_id, user_id],
                |row| row.get(0),
            )?;

            let mut stmt = conn.prepare(&format!(
                "{} WHERE {} ORDER BY r.created_at DESC, r.rowid DESC LIMIT ?3 OFFSET ?4",
                DETAILS_SELECT, predicate
            ))?;

            let items = stmt
                .query_map(
                    params![book_id, user_id, to_sql_int(limit), to_sql_int(offset)],
                    Self::row_to_details,
                )?
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
}
