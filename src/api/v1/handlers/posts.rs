/*
 * Responsibility
 * - /posts 系 CRUD handler
 * - Path の {post_id} は extractor で内部 ID (i64) に変換して受け取る
 * - 書き込みは AuthCtxExtractor 必須 (無ければ 401)。読み取りは匿名可
 */
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::v1::{
        dto::{
            pagination::{PageQuery, Paginated},
            posts::{PostRequest, PostResponse},
        },
        extractors::{ApiJson, ApiQuery, AuthCtxExtractor, RequestUrl, path_id::PostId},
    },
    error::AppError,
    services::posts,
    state::AppState,
};

fn to_responses(rows: Vec<crate::repos::post_repo::PostRow>) -> Vec<PostResponse> {
    rows.into_iter().map(PostResponse::from).collect()
}

pub async fn list_posts(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<PageQuery>,
    RequestUrl(url): RequestUrl,
) -> Result<Response, AppError> {
    let Some(page) = query.page() else {
        let rows = posts::list(state.store.as_ref()).await?;
        return Ok(Json(to_responses(rows)).into_response());
    };

    let (count, rows) = posts::list_page(state.store.as_ref(), page).await?;
    let body = Paginated::new(to_responses(rows), count, page, &url);
    Ok(Json(body).into_response())
}

pub async fn create_post(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    ApiJson(req): ApiJson<PostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), AppError> {
    let row = posts::create(state.store.as_ref(), &actor, req).await?;
    Ok((StatusCode::CREATED, Json(row.into())))
}

pub async fn get_post(
    State(state): State<AppState>,
    post_id: PostId,
) -> Result<Json<PostResponse>, AppError> {
    let row = posts::retrieve(state.store.as_ref(), post_id.id).await?;
    Ok(Json(row.into()))
}

pub async fn update_post(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
    ApiJson(req): ApiJson<PostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let row = posts::update(state.store.as_ref(), &actor, post_id.id, req, false).await?;
    Ok(Json(row.into()))
}

pub async fn patch_post(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
    ApiJson(req): ApiJson<PostRequest>,
) -> Result<Json<PostResponse>, AppError> {
    let row = posts::update(state.store.as_ref(), &actor, post_id.id, req, true).await?;
    Ok(Json(row.into()))
}

pub async fn delete_post(
    State(state): State<AppState>,
    AuthCtxExtractor(actor): AuthCtxExtractor,
    post_id: PostId,
) -> Result<StatusCode, AppError> {
    posts::delete(state.store.as_ref(), &actor, post_id.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
