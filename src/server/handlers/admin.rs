//! Reporting and monitoring handlers

use crate::core::error::LibraryError;
use crate::core::model::{HealthStatus, LibraryStats, SystemStatus};
use crate::server::state::AppState;
use axum::Json;
use axum::extract::State;

pub async fn library_stats(
    State(state): State<AppState>,
) -> Result<Json<LibraryStats>, LibraryError> {
    Ok(Json(state.backend.library_stats().await?))
}

pub async fn system_status(
    State(state): State<AppState>,
) -> Result<Json<SystemStatus>, LibraryError> {
    Ok(Json(state.backend.system_status().await?))
}

pub async fn health(State(state): State<AppState>) -> Result<Json<HealthStatus>, LibraryError> {
    Ok(Json(state.backend.health().await?))
}
