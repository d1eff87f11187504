//! `/users` handlers

use crate::core::error::LibraryError;
use crate::core::model::{User, UserRegisterRequest, UserUpdateRequest};
use crate::server::extract::Validated;
use crate::server::state::AppState;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<User>>, LibraryError> {
    Ok(Json(state.backend.list_users().await?))
}

pub async fn register_user(
    State(state): State<AppState>,
    Validated(request): Validated<UserRegisterRequest>,
) -> Result<(StatusCode, Json<User>), LibraryError> {
    let user = state.backend.register_user(request).await?;
    tracing::info!(user_id = %user.user_id, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<Json<User>, LibraryError> {
    Ok(Json(state.backend.get_user(&user_id).await?))
}

pub async fn update_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
    Validated(request): Validated<UserUpdateRequest>,
) -> Result<Json<User>, LibraryError> {
    Ok(Json(state.backend.update_user(&user_id, request).await?))
}

pub async fn delete_user(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<StatusCode, LibraryError> {
    state.backend.delete_user(&user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
