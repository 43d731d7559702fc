// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file declares all domain modules and re-exports their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod book;
pub mod book_reference;
pub mod ids;
pub mod page;
pub mod review;
pub mod user;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Identifiers
pub use ids::{BookId, ReviewId, UserId};

// Book Domain
pub use book::{validate_book, Book, ExternalBookRecord, NewBook};

// Book references (origin-tagged)
pub use book_reference::{normalize_external_id, BookOrigin, BookReference};

// Review Domain
pub use review::{validate_review_input, Review, ReviewDetails};

// User Domain
pub use user::{
    hash_password, validate_bio, validate_email, validate_password, validate_user,
    validate_username, verify_password, Role, Session, User,
};

// Pagination
pub use page::Page;

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

/// Current time at the precision the store keeps (microseconds)
pub(crate) fn now() -> chrono::DateTime<chrono::Utc> {
    use chrono::SubsecRound;
    chrono::Utc::now().trunc_subsecs(6)
}
