/*
 * Responsibility
 * - /follow 系 handler。すべての method で認証必須
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
};

use crate::{
    api::v1::{
        dto::follows::{FollowQuery, FollowRequest, FollowResponse},
        extractors::{ApiJson, ApiQuery, AuthCtxExtractor, path_id::FollowId},
    },
    error::AppError,
    services::follows,
    state::AppState,
};

pub async fn list_follows(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    ApiQuery(query): ApiQuery<FollowQuery>,
) -> Result<Json<Vec<FollowResponse>>, AppError> {
    let rows = follows::list(state.store.as_ref(), &actor, &query.terms()).await?;
    Ok(Json(rows.into_iter().map(FollowResponse::from).collect()))
}

pub async fn create_follow(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    ApiJson(req): ApiJson<FollowRequest>,
) -> Result<(StatusCode, Json<FollowResponse>), AppError> {
    let row = follows::create(state.store.as_ref(), &actor, req).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn delete_follow(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    follow_id: FollowId,
) -> Result<StatusCode, AppError> {
    follows::delete(state.store.as_ref(), &actor, follow_id.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
