/*
 * Responsibility
 * - posts/{post_id}/comments 配下の Comment ルール
 * - 親 Post を先に解決する (無ければ 404 "post")
 * - post / author は path と actor からのみ決まる
 */
use tracing::debug;

use crate::api::v1::dto::comments::CommentRequest;
use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::comment_repo::{CommentRow, NewComment};
use crate::repos::error::RepoError;
use crate::repos::Store;
use crate::services::policy::ensure_owner;

async fn ensure_post(store: &dyn Store, post_id: i64) -> Result<(), AppError> {
    match store.get_post(post_id).await? {
        Some(_) => Ok(()),
        None => Err(AppError::not_found("post")),
    }
}

pub async fn list(store: &dyn Store, post_id: i64) -> Result<Vec<CommentRow>, AppError> {
    ensure_post(store, post_id).await?;
    Ok(store.list_comments(post_id).await?)
}

pub async fn retrieve(
    store: &dyn Store,
    post_id: i64,
    comment_id: i64,
) -> Result<CommentRow, AppError> {
    ensure_post(store, post_id).await?;
    store
        .get_comment(post_id, comment_id)
        .await?
        .ok_or_else(|| AppError::not_found("comment"))
}

pub async fn create(
    store: &dyn Store,
    actor: &AuthCtx,
    post_id: i64,
    req: CommentRequest,
) -> Result<CommentRow, AppError> {
    ensure_post(store, post_id).await?;
    req.validate(false)?;

    let new = NewComment {
        author_id: actor.user_id,
        post_id,
        text: req.text.flatten().unwrap_or_default(),
    };

    let row = store.create_comment(&new).await.map_err(|e| match e {
        // 親 Post が直前に削除された
        RepoError::MissingReference => AppError::not_found("post"),
        other => other.into(),
    })?;

    debug!(comment_id = row.id, post_id, "comment created");
    Ok(row)
}

pub async fn update(
    store: &dyn Store,
    actor: &AuthCtx,
    post_id: i64,
    comment_id: i64,
    req: CommentRequest,
    partial: bool,
) -> Result<CommentRow, AppError> {
    let existing = retrieve(store, post_id, comment_id).await?;
    ensure_owner(actor, &existing)?;
    req.validate(partial)?;
    let text = req.text.flatten();

    store
        .update_comment(post_id, comment_id, text.as_deref())
        .await?
        .ok_or_else(|| AppError::not_found("comment"))
}

pub async fn delete(
    store: &dyn Store,
    actor: &AuthCtx,
    post_id: i64,
    comment_id: i64,
) -> Result<(), AppError> {
    let existing = retrieve(store, post_id, comment_id).await?;
    ensure_owner(actor, &existing)?;

    if !store.delete_comment(post_id, comment_id).await? {
        return Err(AppError::not_found("comment"));
    }
    debug!(comment_id, post_id, "comment deleted");
    Ok(())
}
