/*
 * Responsibility
 * - Follow edge の作成/一覧/削除ルール
 * - 作成時の検証順: 必須 → 存在するユーザー → 自分自身 → 重複
 *
 * Notes
 * - 重複の事前チェックは最適化。最終的には DB の UNIQUE 制約 (Conflict) で判定する
 * - edge は immutable。更新は無い
 */
use tracing::debug;

use crate::api::v1::dto::follows::FollowRequest;
use crate::api::v1::extractors::AuthCtx;
use crate::api::v1::dto::REQUIRED;
use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::follow_repo::FollowRow;
use crate::repos::Store;
use crate::services::policy::ensure_owner;

pub const SELF_FOLLOW: &str = "You cannot follow yourself.";
pub const ALREADY_FOLLOWING: &str = "You are already following this user.";

/// `terms` are lowercased; each must match the following username exactly.
pub async fn list(
    store: &dyn Store,
    actor: &AuthCtx,
    terms: &[String],
) -> Result<Vec<FollowRow>, AppError> {
    Ok(store.list_follows(actor.user_id, terms).await?)
}

pub async fn create(
    store: &dyn Store,
    actor: &AuthCtx,
    req: FollowRequest,
) -> Result<FollowRow, AppError> {
    let username = req
        .following
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .ok_or_else(|| AppError::invalid_field("following", REQUIRED))?;

    let target = store.find_user_by_username(username).await?.ok_or_else(|| {
        AppError::invalid_field(
            "following",
            format!("Object with username={username} does not exist."),
        )
    })?;

    if target.id == actor.user_id {
        return Err(AppError::invalid_field("following", SELF_FOLLOW));
    }

    if store.follow_exists(actor.user_id, target.id).await? {
        return Err(AppError::invalid(ALREADY_FOLLOWING));
    }

    let row = store
        .create_follow(actor.user_id, target.id)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::invalid(ALREADY_FOLLOWING),
            other => other.into(),
        })?;

    debug!(follow_id = row.id, user = %actor.user_id, following = %target.id, "follow created");
    Ok(row)
}

pub async fn delete(store: &dyn Store, actor: &AuthCtx, follow_id: i64) -> Result<(), AppError> {
    let existing = store
        .get_follow(follow_id)
        .await?
        .ok_or_else(|| AppError::not_found("follow"))?;
    ensure_owner(actor, &existing)?;

    if !store.delete_follow(follow_id).await? {
        return Err(AppError::not_found("follow"));
    }
    debug!(follow_id, "follow deleted");
    Ok(())
}
