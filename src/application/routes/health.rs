// src/application/routes/health.rs

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::application::state::AppState;
use crate::db::{get_database_stats, with_connection, DatabaseStats};
use crate::error::AppResult;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub database: DatabaseStats,
}

/// Liveness plus catalog counts
pub async fn health_check(State(state): State<AppState>) -> AppResult<Json<HealthResponse>> {
    let database = with_connection(&state.pool, get_database_stats).await?;

    Ok(Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        database,
    }))
}
