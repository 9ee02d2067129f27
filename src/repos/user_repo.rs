/*
 * Responsibility
 * - users テーブル向け SQLx 操作
 * - username の一意性は DB の UNIQUE 制約 (RepoError::Conflict)
 */
use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use crate::repos::PgRepo;
use crate::repos::error::{RepoError, RepoResult};

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
}

#[async_trait]
pub trait UserRepo: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> RepoResult<UserRow>;

    async fn get_user(&self, user_id: Uuid) -> RepoResult<Option<UserRow>>;

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<UserRow>>;
}

#[async_trait]
impl UserRepo for PgRepo {
    async fn create_user(&self, username: &str, password_hash: &str) -> RepoResult<UserRow> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(username)
        .bind(password_hash)
        .fetch_one(self.pool())
        .await
        .map_err(RepoError::from_sqlx)?;

        Ok(row)
    }

    async fn get_user(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(self.pool())
        .await?;

        Ok(row)
    }
}
