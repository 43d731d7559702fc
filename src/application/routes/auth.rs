// src/application/routes/auth.rs

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::dto::{AuthDto, LoginDto, RegisterDto};
use crate::application::extractor::JsonBody;
use crate::application::state::AppState;
use crate::error::AppResult;

pub async fn register(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<RegisterDto>,
) -> AppResult<(StatusCode, Json<AuthDto>)> {
    let session = state.user_service.register(body.into()).await?;
    Ok((StatusCode::CREATED, Json(session.into())))
}

pub async fn login(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<LoginDto>,
) -> AppResult<Json<AuthDto>> {
    let session = state.user_service.login(&body.email, &body.password).await?;
    Ok(Json(session.into()))
}
