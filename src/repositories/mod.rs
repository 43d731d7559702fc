// src/repositories/mod.rs
//
// Repository layer
//
// RULES:
// - Repositories are data mappers over SQLite
// - Uniqueness is enforced by the schema; constraint failures map to typed errors
// - NO cross-repository calls
// - Explicit SQL only

pub mod book_repository;
pub mod review_repository;
pub mod session_repository;
pub mod user_repository;

pub use book_repository::{BookRepository, SqliteBookRepository};
pub use review_repository::{ReviewFilter, ReviewRepository, SqliteReviewRepository};
pub use session_repository::{SessionRepository, SqliteSessionRepository};
pub use user_repository::{SqliteUserRepository, UserRepository};
