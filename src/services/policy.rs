/*
 * Responsibility
 * - 「作成者のみ更新/削除可」の判定を一箇所にまとめる
 * - posts / comments / follows の mutating path から共通で呼ぶ
 */
use uuid::Uuid;

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::comment_repo::CommentRow;
use crate::repos::follow_repo::FollowRow;
use crate::repos::post_repo::PostRow;

/// A record with a single owning user.
pub trait Owned {
    fn owner_id(&self) -> Uuid;
}

impl Owned for PostRow {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for CommentRow {
    fn owner_id(&self) -> Uuid {
        self.author_id
    }
}

impl Owned for FollowRow {
    fn owner_id(&self) -> Uuid {
        self.user_id
    }
}

/// Call after the record is resolved and before any validation or write.
pub fn ensure_owner(actor: &AuthCtx, record: &impl Owned) -> Result<(), AppError> {
    if actor.user_id == record.owner_id() {
        Ok(())
    } else {
        tracing::debug!(
            actor = %actor.user_id,
            owner = %record.owner_id(),
            "ownership check failed"
        );
        Err(AppError::Forbidden)
    }
}
