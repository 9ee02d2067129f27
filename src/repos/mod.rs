/*
 * Responsibility
 * - テーブルごとの repo trait を束ねた Store を公開する
 * - 本番は PgRepo (sqlx / Postgres)、テストは MemoryRepo
 * - 認可・バリデーションは services 側。ここはデータアクセスのみ
 */
pub mod comment_repo;
pub mod error;
pub mod follow_repo;
pub mod group_repo;
#[cfg(test)]
pub mod memory;
pub mod post_repo;
pub mod user_repo;

use sqlx::PgPool;

pub use comment_repo::CommentRepo;
pub use follow_repo::FollowRepo;
pub use group_repo::GroupRepo;
pub use post_repo::PostRepo;
pub use user_repo::UserRepo;

/// LIMIT / OFFSET window. Values are already validated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

/// Everything a handler needs from persistence.
pub trait Store: UserRepo + PostRepo + CommentRepo + GroupRepo + FollowRepo {}

impl<T> Store for T where T: UserRepo + PostRepo + CommentRepo + GroupRepo + FollowRepo {}

/// Postgres-backed store. Cheap to clone (PgPool is an Arc inside).
#[derive(Clone, Debug)]
pub struct PgRepo {
    pool: PgPool,
}

impl PgRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}
