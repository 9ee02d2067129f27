/*
 * Responsibility
 * - follows (user -> following の有向エッジ) の作成・参照・削除
 * - (user_id, following_id) の一意性は UNIQUE 制約が正。service 側の事前チェックは補助
 */
use async_trait::async_trait;
use uuid::Uuid;

use crate::repos::PgRepo;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct FollowRow {
    pub id: i64,
    pub user_id: Uuid,
    pub user_username: String,
    pub following_username: String,
}

#[async_trait]
pub trait FollowRepo: Send + Sync {
    /// Edges owned by `user_id`. Every term in `following_terms` (already lowercased)
    /// must equal the followed username case-insensitively; empty means no filter.
    async fn list_follows(
        &self,
        user_id: Uuid,
        following_terms: &[String],
    ) -> RepoResult<Vec<FollowRow>>;

    async fn follow_exists(&self, user_id: Uuid, following_id: Uuid) -> RepoResult<bool>;

    async fn get_follow(&self, follow_id: i64) -> RepoResult<Option<FollowRow>>;

    /// Returns `RepoError::Conflict` when the pair already exists.
    async fn create_follow(&self, user_id: Uuid, following_id: Uuid) -> RepoResult<FollowRow>;

    async fn delete_follow(&self, follow_id: i64) -> RepoResult<bool>;
}

#[async_trait]
impl FollowRepo for PgRepo {
    async fn list_follows(
        &self,
        user_id: Uuid,
        following_terms: &[String],
    ) -> RepoResult<Vec<FollowRow>> {
        // `x = ALL('{}')` is true, so an empty term list disables the filter.
        let rows = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT
                f.id,
                f.user_id, u.username AS user_username,
                t.username AS following_username
            FROM follows f
            JOIN users u ON u.id = f.user_id
            JOIN users t ON t.id = f.following_id
            WHERE f.user_id = $1
                AND lower(t.username) = ALL($2)
            ORDER BY f.id
            "#,
        )
        .bind(user_id)
        .bind(following_terms.to_vec())
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn follow_exists(&self, user_id: Uuid, following_id: Uuid) -> RepoResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM follows
                WHERE user_id = $1 AND following_id = $2
            )
            "#,
        )
        .bind(user_id)
        .bind(following_id)
        .fetch_one(self.pool())
        .await?;

        Ok(exists)
    }

    async fn get_follow(&self, follow_id: i64) -> RepoResult<Option<FollowRow>> {
        let row = sqlx::query_as::<_, FollowRow>(
            r#"
            SELECT
                f.id,
                f.user_id, u.username AS user_username,
                t.username AS following_username
            FROM follows f
            JOIN users u ON u.id = f.user_id
            JOIN users t ON t.id = f.following_id
            WHERE f.id = $1
            "#,
        )
        .bind(follow_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn create_follow(&self, user_id: Uuid, following_id: Uuid) -> RepoResult<FollowRow> {
        let row = sqlx::query_as::<_, FollowRow>(
            r#"
            WITH inserted AS (
                INSERT INTO follows (user_id, following_id)
                VALUES ($1, $2)
                RETURNING id, user_id, following_id
            )
            SELECT
                f.id,
                f.user_id, u.username AS user_username,
                t.username AS following_username
            FROM inserted f
            JOIN users u ON u.id = f.user_id
            JOIN users t ON t.id = f.following_id
            "#,
        )
        .bind(user_id)
        .bind(following_id)
        .fetch_one(self.pool())
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete_follow(&self, follow_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM follows
            WHERE id = $1
            "#,
        )
        .bind(follow_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
