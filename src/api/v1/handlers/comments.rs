/*
 * Responsibility
 * - /posts/{post_id}/comments 系 handler
 * - post_id は常に path から。body の post は無視される
 */
use axum::{Json, extract::State, http::StatusCode};

use crate::{
    api::v1::{
        dto::comments::{CommentRequest, CommentResponse},
        extractors::{
            ApiJson, AuthCtxExtractor,
            path_id::{CommentId, PostId},
        },
    },
    error::AppError,
    services::comments,
    state::AppState,
};

pub async fn list_comments(
    State(state): State<AppState>,
    post_id: PostId,
) -> Result<Json<Vec<CommentResponse>>, AppError> {
    let rows = comments::list(state.store.as_ref(), post_id.id).await?;
    Ok(Json(rows.into_iter().map(CommentResponse::from).collect()))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
    ApiJson(req): ApiJson<CommentRequest>,
) -> Result<(StatusCode, Json<CommentResponse>), AppError> {
    let row = comments::create(state.store.as_ref(), &actor, post_id.id, req).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_comment(
    State(state): State<AppState>,
    post_id: PostId,
    comment_id: CommentId,
) -> Result<Json<CommentResponse>, AppError> {
    let row = comments::retrieve(state.store.as_ref(), post_id.id, comment_id.id).await?;
    Ok(Json(row.into()))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
    comment_id: CommentId,
    ApiJson(req): ApiJson<CommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let row = comments::update(
        state.store.as_ref(),
        &actor,
        post_id.id,
        comment_id.id,
        req,
        false,
    )
    .await?;
    Ok(Json(row.into()))
}

pub async fn patch_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
    comment_id: CommentId,
    ApiJson(req): ApiJson<CommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let row = comments::update(
        state.store.as_ref(),
        &actor,
        post_id.id,
        comment_id.id,
        req,
        true,
    )
    .await?;
    Ok(Json(row.into()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
    comment_id: CommentId,
) -> Result<StatusCode, AppError> {
    comments::delete(state.store.as_ref(), &actor, post_id.id, comment_id.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
