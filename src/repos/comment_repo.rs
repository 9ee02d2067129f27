/*
 * Responsibility
 * - comments CRUD (常に post_id でスコープする)
 * - post_id の FK 違反は RepoError::MissingReference
 */
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::repos::PgRepo;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    pub id: i64,
    pub author_id: Uuid,
    pub author_username: String,
    pub post_id: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub author_id: Uuid,
    pub post_id: i64,
    pub text: String,
}

#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn list_comments(&self, post_id: i64) -> RepoResult<Vec<CommentRow>>;

    async fn get_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<Option<CommentRow>>;

    async fn create_comment(&self, new: &NewComment) -> RepoResult<CommentRow>;

    async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        text: Option<&str>,
    ) -> RepoResult<Option<CommentRow>>;

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<bool>;
}

#[async_trait]
impl CommentRepo for PgRepo {
    async fn list_comments(&self, post_id: i64) -> RepoResult<Vec<CommentRow>> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.id, c.author_id, u.username AS author_username,
                c.post_id, c.text, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1
            ORDER BY c.id
            "#,
        )
        .bind(post_id)
        .fetch_all(self.pool())
        .await?;

        Ok(rows)
    }

    async fn get_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<Option<CommentRow>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT
                c.id, c.author_id, u.username AS author_username,
                c.post_id, c.text, c.created
            FROM comments c
            JOIN users u ON u.id = c.author_id
            WHERE c.post_id = $1 AND c.id = $2
            "#,
        )
        .bind(post_id)
        .bind(comment_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn create_comment(&self, new: &NewComment) -> RepoResult<CommentRow> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH inserted AS (
                INSERT INTO comments (author_id, post_id, text)
                VALUES ($1, $2, $3)
                RETURNING id, author_id, post_id, text, created
            )
            SELECT
                c.id, c.author_id, u.username AS author_username,
                c.post_id, c.text, c.created
            FROM inserted c
            JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(new.author_id)
        .bind(new.post_id)
        .bind(&new.text)
        .fetch_one(self.pool())
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        text: Option<&str>,
    ) -> RepoResult<Option<CommentRow>> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            WITH updated AS (
                UPDATE comments
                SET text = COALESCE($3, text)
                WHERE post_id = $1 AND id = $2
                RETURNING id, author_id, post_id, text, created
            )
            SELECT
                c.id, c.author_id, u.username AS author_username,
                c.post_id, c.text, c.created
            FROM updated c
            JOIN users u ON u.id = c.author_id
            "#,
        )
        .bind(post_id)
        .bind(comment_id)
        .bind(text)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE post_id = $1 AND id = $2
            "#,
        )
        .bind(post_id)
        .bind(comment_id)
        .execute(self.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
