/*
 * Responsibility
 * - POST /users (アカウント登録)
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::users::{RegisterRequest, UserResponse},
        extractors::ApiJson,
    },
    error::AppError,
    services::users,
    state::AppState,
};

pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let row = users::register(state.store.as_ref(), req).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}
