// src/application/error_handling.rs
//
// Error Handling for HTTP handlers
//
// ARCHITECTURE:
// - Maps internal errors → client-facing responses
// - Provides one error body shape for every endpoint
// - Never exposes internal implementation details
// - Logs internal errors for debugging

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// Resource not found (404)
    NotFound,

    /// Invalid input (400)
    Validation,

    /// Already exists for this caller (400)
    Duplicate,

    /// Username or email already taken (409)
    Conflict,

    /// Missing or bad credentials (401)
    Unauthenticated,

    /// Authenticated but not allowed (403)
    Forbidden,

    /// Book provider error (502)
    ExternalService,

    /// Request took too long (408)
    Timeout,

    /// Database/persistence error (500)
    Database,

    /// Other/unknown error (500)
    Internal,
}

/// HTTP status for an application error
pub fn status_code(error: &AppError) -> StatusCode {
    match error {
        AppError::BookNotFound | AppError::ExternalBookNotFound(_) | AppError::NotFound => {
            StatusCode::NOT_FOUND
        }
        AppError::DuplicateReview
        | AppError::InvalidReviewInput(_)
        | AppError::InvalidFilter
        | AppError::InvalidReference(_)
        | AppError::Validation(_)
        | AppError::Domain(_) => StatusCode::BAD_REQUEST,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AppError::Forbidden => StatusCode::FORBIDDEN,
        AppError::GatewayUnavailable(_) => StatusCode::BAD_GATEWAY,
        AppError::DuplicateExternalId(_)
        | AppError::Database(_)
        | AppError::Pool(_)
        | AppError::Serialization(_)
        | AppError::Io(_)
        | AppError::PasswordHash(_)
        | AppError::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: &AppError) -> Self {
        match error {
            AppError::BookNotFound | AppError::NotFound | AppError::ExternalBookNotFound(_) => {
                Self::new(ErrorType::NotFound, error.to_string(), None)
            }

            AppError::DuplicateReview => Self::new(ErrorType::Duplicate, error.to_string(), None),

            AppError::InvalidReviewInput(msg)
            | AppError::InvalidReference(msg)
            | AppError::Validation(msg) => {
                Self::new(ErrorType::Validation, msg.clone(), None)
            }

            AppError::InvalidFilter => Self::new(ErrorType::Validation, error.to_string(), None),

            AppError::Domain(domain_error) => Self::new(
                ErrorType::Validation,
                "Validation failed".to_string(),
                Some(domain_error.to_string()),
            ),

            AppError::Conflict(msg) => Self::new(ErrorType::Conflict, msg.clone(), None),

            AppError::Unauthenticated => {
                Self::new(ErrorType::Unauthenticated, error.to_string(), None)
            }

            AppError::Forbidden => Self::new(ErrorType::Forbidden, error.to_string(), None),

            AppError::GatewayUnavailable(msg) => {
                log::warn!("Book provider error: {}", msg);
                Self::new(
                    ErrorType::ExternalService,
                    "Book provider is unavailable".to_string(),
                    None,
                )
            }

            AppError::Database(_) | AppError::Pool(_) => {
                // Log full error for debugging
                log::error!("Database error: {:?}", error);
                Self::new(
                    ErrorType::Database,
                    "Database operation failed".to_string(),
                    Some("Check logs for details".to_string()),
                )
            }

            AppError::DuplicateExternalId(_)
            | AppError::Serialization(_)
            | AppError::Io(_)
            | AppError::PasswordHash(_)
            | AppError::Other(_) => {
                log::error!("Internal error: {:?}", error);
                Self::new(ErrorType::Internal, "Internal server error".to_string(), None)
            }
        }
    }

    fn new(error_type: ErrorType, message: String, details: Option<String>) -> Self {
        Self {
            success: false,
            error_type,
            message,
            details,
        }
    }

    /// Body used when the request deadline fires
    pub fn timeout() -> Self {
        Self::new(ErrorType::Timeout, "Request timed out".to_string(), None)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_code(&self);
        let body = ErrorResponse::from_app_error(&self);
        (status, Json(body)).into_response()
    }
}
