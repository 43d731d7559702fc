// src/application/routes/books.rs

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::{
    BookDto, CanonicalBookDto, CreateBookDto, PageDto, PageQuery, SearchQuery, SearchResultDto,
};
use crate::application::extractor::{AuthenticatedUser, JsonBody, QueryParams};
use crate::application::state::AppState;
use crate::domain::BookReference;
use crate::error::{AppError, AppResult};

/// GET /api/books
pub async fn list_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<PageQuery>,
) -> AppResult<Json<PageDto<BookDto>>> {
    let page = state.catalog_service.list_books(query.page, query.limit).await?;
    Ok(Json(PageDto::from_page(page)))
}

/// POST /api/books (admin)
pub async fn add_book(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    JsonBody(body): JsonBody<CreateBookDto>,
) -> AppResult<(StatusCode, Json<BookDto>)> {
    let book = state
        .catalog_service
        .add_local_book(actor.user(), body.into())
        .await?;
    Ok((StatusCode::CREATED, Json(book.into())))
}

/// GET /api/books/search
pub async fn search_books(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> AppResult<Json<SearchResultDto>> {
    let result = state
        .catalog_service
        .search_external(&query.q, query.limit, query.offset)
        .await?;
    Ok(Json(result.into()))
}

/// GET /api/books/:kind/:id
pub async fn resolve_book(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<Json<CanonicalBookDto>> {
    let reference = BookReference::parse(&kind, &id)?;
    let canonical = state.identity_service.resolve(&reference).await?;
    Ok(Json(canonical.into()))
}

/// POST /api/books/:kind/:id - save an external book into the catalog
pub async fn save_book(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path((kind, id)): Path<(String, String)>,
) -> AppResult<(StatusCode, Json<CanonicalBookDto>)> {
    let external_id = match BookReference::parse(&kind, &id)? {
        BookReference::External(external_id) => external_id,
        BookReference::Local(_) => {
            return Err(AppError::InvalidReference(
                "only external books can be saved".to_string(),
            ))
        }
    };

    let saved = state
        .identity_service
        .save_external(&external_id, Some(actor.user().id))
        .await?;
    let status = if saved.imported {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(saved.into())))
}

/// GET /api/books/saved/:external_id
pub async fn saved_book(
    State(state): State<AppState>,
    Path(external_id): Path<String>,
) -> AppResult<Json<BookDto>> {
    let book = state
        .identity_service
        .lookup_external(&external_id)
        .await?
        .ok_or(AppError::BookNotFound)?;
    Ok(Json(book.into()))
}
