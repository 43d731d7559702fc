// src/application/routes/reviews.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::{PageDto, ReviewDto, ReviewListQuery, SubmitReviewDto};
use crate::application::extractor::{AuthenticatedUser, JsonBody, QueryParams};
use crate::application::state::AppState;
use crate::domain::{BookReference, UserId};
use crate::error::{AppError, AppResult};
use crate::services::{page_window, ReviewQuery};

/// POST /api/reviews
pub async fn submit_review(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    JsonBody(body): JsonBody<SubmitReviewDto>,
) -> AppResult<(StatusCode, Json<ReviewDto>)> {
    let reference = body.book.parse()?;
    let details = state
        .review_service
        .submit_review(&reference, actor.user().id, body.rating, &body.comment)
        .await?;
    Ok((StatusCode::CREATED, Json(details.into())))
}

/// GET /api/reviews?bookKind&bookId&userId&page&limit
pub async fn list_reviews(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<ReviewListQuery>,
) -> AppResult<Json<PageDto<ReviewDto>>> {
    let (offset, limit) = page_window(query.page, query.limit)?;

    let book = match (query.book_kind.as_deref(), query.book_id.as_deref()) {
        (_, None) => None,
        // A bare bookId names a local book
        (kind, Some(id)) => Some(BookReference::parse(kind.unwrap_or("local"), id)?),
    };

    let user_id = query
        .user_id
        .as_deref()
        .map(|id| {
            id.trim()
                .parse::<UserId>()
                .map_err(|_| AppError::Validation(format!("'{}' is not a user id", id)))
        })
        .transpose()?;

    let page = state
        .review_service
        .list_reviews(ReviewQuery {
            book,
            user_id,
            offset,
            limit,
        })
        .await?;
    Ok(Json(PageDto::from_page(page)))
}
