// src/services/review_service.rs
//
// Review Service
//
// Reviews always point at a canonical local Book. External references are
// materialized on first review.
//
// RULES:
// - Input is validated before any I/O
// - One review per (book, user); the store's UNIQUE constraint is authoritative
// - Listing never writes and never calls the provider

use std::sync::Arc;

use super::book_identity_service::BookIdentityService;
use crate::domain::{validate_review_input, BookReference, Page, Review, ReviewDetails, UserId};
use crate::error::{AppError, AppResult};
use crate::repositories::{ReviewFilter, ReviewRepository};

/// Filters and window for listing reviews
#[derive(Debug, Clone, Default)]
pub struct ReviewQuery {
    pub book: Option<BookReference>,
    pub user_id: Option<UserId>,
    pub offset: u64,
    pub limit: u64,
}

pub struct ReviewService {
    review_repo: Arc<dyn ReviewRepository>,
    identity: Arc<BookIdentityService>,
}

impl ReviewService {
    pub fn new(
        review_repo: Arc<dyn ReviewRepository>,
        identity: Arc<BookIdentityService>,
    ) -> Self {
        Self {
            review_repo,
            identity,
        }
    }

    /// Record `user_id`'s review of the referenced book
    pub async fn submit_review(
        &self,
        reference: &BookReference,
        user_id: UserId,
        rating: i64,
        comment: &str,
    ) -> AppResult<ReviewDetails> {
        // Step 1: validate before touching storage or the provider
        let (rating, comment) = validate_review_input(rating, comment)
            .map_err(|e| AppError::InvalidReviewInput(invariant_message(e)))?;

        // Step 2: canonical local book, importing external references
        let book_id = self.identity.canonical_id(reference, Some(user_id)).await?;

        // Step 3: friendly pre-check; the insert below is what actually decides
        if self
            .review_repo
            .find_by_book_and_user(book_id, user_id)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateReview);
        }

        // Step 4: insert
        let review = self
            .review_repo
            .create(Review::new(book_id, user_id, rating, comment))
            .await?;

        log::info!("User {} reviewed book {} ({}/5)", user_id, book_id, review.rating);

        // Step 5: read-time join for the response
        self.review_repo
            .find_details(review.id)
            .await?
            .ok_or_else(|| AppError::Other(format!("Review {} vanished after insert", review.id)))
    }

    /// Newest-first reviews for a book, a user, or both
    pub async fn list_reviews(&self, query: ReviewQuery) -> AppResult<Page<ReviewDetails>> {
        if query.book.is_none() && query.user_id.is_none() {
            return Err(AppError::InvalidFilter);
        }

        let book_id = match &query.book {
            None => None,
            Some(BookReference::Local(id)) => Some(*id),
            Some(BookReference::External(external_id)) => {
                match self.identity.lookup_external(external_id).await? {
                    Some(book) => Some(book.id),
                    // Not materialized, so nobody has reviewed it
                    None => return Ok(Page::empty(query.offset, query.limit)),
                }
            }
        };

        self.review_repo
            .list(
                ReviewFilter {
                    book_id,
                    user_id: query.user_id,
                },
                query.offset,
                query.limit,
            )
            .await
    }
}

fn invariant_message(err: crate::domain::DomainError) -> String {
    match err {
        crate::domain::DomainError::InvariantViolation(msg) => msg,
    }
}
