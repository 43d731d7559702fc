// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    // ------------------------------------------------------------------
    // Book identity / review kinds
    // ------------------------------------------------------------------
    #[error("Book not found")]
    BookNotFound,

    #[error("External book not found: {0}")]
    ExternalBookNotFound(String),

    #[error("Book provider unavailable: {0}")]
    GatewayUnavailable(String),

    /// Raised by the catalog store; `materialize` absorbs it.
    #[error("A book with external id {0} already exists")]
    DuplicateExternalId(String),

    #[error("You have already reviewed this book")]
    DuplicateReview,

    #[error("Invalid review: {0}")]
    InvalidReviewInput(String),

    #[error("Either bookId or userId is required")]
    InvalidFilter,

    #[error("Invalid book reference: {0}")]
    InvalidReference(String),

    // ------------------------------------------------------------------
    // Ambient kinds
    // ------------------------------------------------------------------
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Resource not found")]
    NotFound,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Authentication failed")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    #[error("Password hashing error: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Other error: {0}")]
    Other(String),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<uuid::Error> for AppError {
    fn from(err: uuid::Error) -> Self {
        AppError::Other(format!("UUID error: {}", err))
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Blocking task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;
