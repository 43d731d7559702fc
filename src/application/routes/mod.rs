// src/application/routes/mod.rs
//
// HTTP route table

pub mod auth;
pub mod books;
pub mod health;
pub mod reviews;
pub mod users;

use std::time::Duration;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::error_handling::ErrorResponse;
use super::state::AppState;
use crate::config::ServerConfig;

/// Create the API router with its middleware stack
pub fn create_router(state: AppState, config: &ServerConfig) -> Router {
    let mut router = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Auth
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        // Books
        .route("/api/books", get(books::list_books).post(books::add_book))
        .route("/api/books/search", get(books::search_books))
        .route("/api/books/saved/:external_id", get(books::saved_book))
        .route(
            "/api/books/:kind/:id",
            get(books::resolve_book).post(books::save_book),
        )
        // Reviews
        .route(
            "/api/reviews",
            get(reviews::list_reviews).post(reviews::submit_review),
        )
        // Users
        .route(
            "/api/users/:id",
            get(users::get_profile).put(users::update_profile),
        )
        .fallback(not_found)
        .with_state(state);

    router = router
        .layer(middleware::from_fn_with_state(
            config.request_timeout,
            enforce_deadline,
        ))
        .layer(TraceLayer::new_for_http());

    if config.enable_cors {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}

async fn not_found() -> impl IntoResponse {
    let mut body = ErrorResponse::from_app_error(&crate::error::AppError::NotFound);
    body.message = "Route not found".to_string();
    (StatusCode::NOT_FOUND, Json(body))
}

/// Abandon a handler that outlives the request deadline
async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            log::warn!("Request to {} exceeded {:?}", path, deadline);
            (StatusCode::REQUEST_TIMEOUT, Json(ErrorResponse::timeout())).into_response()
        }
    }
}
