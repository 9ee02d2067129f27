/*
 * Responsibility
 * - posts CRUD
 * - author_id の FK (CASCADE)、group_id の FK (SET NULL) 前提
 * - 返却行は author の username を JOIN 済みで持つ (レスポンスは username を返すため)
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::error::{RepoError, RepoResult};
use crate::repos::{Page, PgRepo};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    pub id: i64,
    pub text: String,
    pub author_id: Uuid,
    pub author_username: String,
    pub image: Option<String>,
    pub group_id: Option<i64>,
    pub pub_date: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub author_id: Uuid,
    pub text: String,
    pub image: Option<String>,
    pub group_id: Option<i64>,
}

/// Partial update.
///
/// `image` / `group_id` are tri-state:
/// - None: do not update
/// - Some(None): set NULL
/// - Some(Some(v)): set value
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub text: Option<String>,
    pub image: Option<Option<String>>,
    pub group_id: Option<Option<i64>>,
}

#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn list_posts(&self, page: Option<Page>) -> RepoResult<Vec<PostRow>>;

    async fn count_posts(&self) -> RepoResult<i64>;

    async fn get_post(&self, post_id: i64) -> RepoResult<Option<PostRow>>;

    async fn create_post(&self, new: &NewPost) -> RepoResult<PostRow>;

    async fn update_post(&self, post_id: i64, changes: &PostChanges)
    -> RepoResult<Option<PostRow>>;

    async fn delete_post(&self, post_id: i64) -> RepoResult<bool>;
}

#[async_trait]
impl PostRepo for PgRepo {
    async fn list_posts(&self, page: Option<Page>) -> RepoResult<Vec<PostRow>> {
        // LIMIT NULL = no limit
        let (limit, offset) = match page {
            Some(p) => (Some(p.limit), p.offset),
            None => (None, 0),
        };

        let rows = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p.id, p.text, p.author_id, u.username AS author_username,
                p.image, p.group_id, p.pub_date
            FROM posts p
            JOIN users u ON u.id = p.author_id
            ORDER BY p.id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn count_posts(&self) -> RepoResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM posts")
            .fetch_one(self.pool())
            .await?;

        Ok(count)
    }

    async fn get_post(&self, post_id: i64) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            SELECT
                p.id, p.text, p.author_id, u.username AS author_username,
                p.image, p.group_id, p.pub_date
            FROM posts p
            JOIN users u ON u.id = p.author_id
            WHERE p.id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn create_post(&self, new: &NewPost) -> RepoResult<PostRow> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH inserted AS (
                INSERT INTO posts (text, author_id, image, group_id)
                VALUES ($1, $2, $3, $4)
                RETURNING id, text, author_id, image, group_id, pub_date
            )
            SELECT
                p.id, p.text, p.author_id, u.username AS author_username,
                p.image, p.group_id, p.pub_date
            FROM inserted p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(&new.text)
        .bind(new.author_id)
        .bind(new.image.as_deref())
        .bind(new.group_id)
        .fetch_one(self.pool())
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update_post(
        &self,
        post_id: i64,
        changes: &PostChanges,
    ) -> RepoResult<Option<PostRow>> {
        let row = sqlx::query_as::<_, PostRow>(
            r#"
            WITH updated AS (
                UPDATE posts
                SET
                    text = COALESCE($2, text),
                    image = CASE WHEN $3 = false THEN image ELSE $4 END,
                    group_id = CASE WHEN $5 = false THEN group_id ELSE $6 END
                WHERE id = $1
                RETURNING id, text, author_id, image, group_id, pub_date
            )
            SELECT
                p.id, p.text, p.author_id, u.username AS author_username,
                p.image, p.group_id, p.pub_date
            FROM updated p
            JOIN users u ON u.id = p.author_id
            "#,
        )
        .bind(post_id)
        .bind(changes.text.as_deref())
        .bind(changes.image.is_some()) // $3: flag to set image
        .bind(changes.image.clone().flatten()) // $4: new image value
        .bind(changes.group_id.is_some()) // $5: flag to set group_id
        .bind(changes.group_id.flatten()) // $6: new group_id value
        .fetch_optional(self.pool())
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn delete_post(&self, post_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
