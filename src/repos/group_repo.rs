/*
 * Responsibility
 * - groups の参照系のみ (作成は API の外で行う)
 */
use async_trait::async_trait;

use crate::repos::PgRepo;
use crate::repos::error::RepoResult;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GroupRow {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
}

#[async_trait]
pub trait GroupRepo: Send + Sync {
    async fn list_groups(&self) -> RepoResult<Vec<GroupRow>>;

    async fn get_group(&self, group_id: i64) -> RepoResult<Option<GroupRow>>;
}

#[async_trait]
impl GroupRepo for PgRepo {
    async fn list_groups(&self) -> RepoResult<Vec<GroupRow>> {
        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, title, slug, description
            FROM groups
            ORDER BY id
            "#,
        )
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn get_group(&self, group_id: i64) -> RepoResult<Option<GroupRow>> {
        let row = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, title, slug, description
            FROM groups
            WHERE id = $1
            "#,
        )
        .bind(group_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }
}
