// src/application/state.rs

use std::sync::Arc;

use crate::config::AppConfig;
use crate::db::ConnectionPool;
use crate::integrations::BookCatalogGateway;
use crate::repositories::{
    SqliteBookRepository, SqliteReviewRepository, SqliteSessionRepository, SqliteUserRepository,
};
use crate::services::{BookIdentityService, CatalogService, ReviewService, UserService};

/// Application state shared by every handler.
/// All fields are Arc-wrapped; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    pub pool: Arc<ConnectionPool>,
    pub identity_service: Arc<BookIdentityService>,
    pub review_service: Arc<ReviewService>,
    pub user_service: Arc<UserService>,
    pub catalog_service: Arc<CatalogService>,
}

impl AppState {
    /// Wire SQLite repositories and the given provider gateway into services
    pub fn new(
        pool: Arc<ConnectionPool>,
        gateway: Arc<dyn BookCatalogGateway>,
        config: &AppConfig,
    ) -> Self {
        let book_repo = Arc::new(SqliteBookRepository::new(Arc::clone(&pool)));
        let review_repo = Arc::new(SqliteReviewRepository::new(Arc::clone(&pool)));
        let user_repo = Arc::new(SqliteUserRepository::new(Arc::clone(&pool)));
        let session_repo = Arc::new(SqliteSessionRepository::new(Arc::clone(&pool)));

        let identity_service = Arc::new(BookIdentityService::new(
            book_repo.clone(),
            Arc::clone(&gateway),
        ));
        let review_service = Arc::new(ReviewService::new(
            review_repo,
            Arc::clone(&identity_service),
        ));
        let user_service = Arc::new(UserService::new(
            user_repo,
            session_repo,
            config.auth.clone(),
        ));
        let catalog_service = Arc::new(CatalogService::new(book_repo, gateway));

        Self {
            pool,
            identity_service,
            review_service,
            user_service,
            catalog_service,
        }
    }
}
