// src/lib.rs
// bookshelf - book catalog and review service
//
// Architecture:
// - Domain-centric: entities and invariants live in `domain`
// - Canonical identity: every review references one local Book; external
//   (Google Books) volumes are materialized on first use
// - Storage-enforced uniqueness: SQLite constraints decide races
// - Application Layer: HTTP boundary (axum)

// ============================================================================
// FOUNDATION
// ============================================================================

pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Entities
// ============================================================================

pub use domain::{
    Book, BookId, BookOrigin, BookReference, ExternalBookRecord, NewBook, Page, Review,
    ReviewDetails, ReviewId, Role, User, UserId,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Database
// ============================================================================

pub use db::{create_connection_pool, create_memory_pool, initialize_database, ConnectionPool};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    BookRepository, ReviewFilter, ReviewRepository, SessionRepository, SqliteBookRepository,
    SqliteReviewRepository, SqliteSessionRepository, SqliteUserRepository, UserRepository,
};

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    AuthSession, BookIdentityService, CanonicalBook, CatalogService, NewBookInput, RegisterUser,
    ReviewQuery, ReviewService, UpdateProfile, UserService,
};

// ============================================================================
// PUBLIC API - Integrations & Application
// ============================================================================

pub use integrations::{BookCatalogGateway, ExternalSearchResult, GoogleBooksClient};

pub use application::{create_router, AppState};
