// src/application/routes/users.rs

use axum::extract::{Path, State};
use axum::Json;

use crate::application::dto::{UpdateProfileDto, UserDto};
use crate::application::extractor::{AuthenticatedUser, JsonBody};
use crate::application::state::AppState;
use crate::domain::UserId;
use crate::error::{AppError, AppResult};

fn parse_user_id(raw: &str) -> AppResult<UserId> {
    // Unparseable ids cannot name an existing user
    raw.trim().parse::<UserId>().map_err(|_| AppError::NotFound)
}

/// GET /api/users/:id (owner or admin)
pub async fn get_profile(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<UserDto>> {
    let user = state
        .user_service
        .get_profile(actor.user(), parse_user_id(&id)?)
        .await?;
    Ok(Json(user.into()))
}

/// PUT /api/users/:id (owner)
pub async fn update_profile(
    State(state): State<AppState>,
    actor: AuthenticatedUser,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<UpdateProfileDto>,
) -> AppResult<Json<UserDto>> {
    let user = state
        .user_service
        .update_profile(actor.user(), parse_user_id(&id)?, body.into())
        .await?;
    Ok(Json(user.into()))
}
