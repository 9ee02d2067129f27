/*
 * Responsibility
 * - Follow の request/response DTO と検索クエリ
 * - user 側は常に AuthCtx。body には following (username) だけを受ける
 */
use serde::{Deserialize, Serialize};

use crate::repos::follow_repo::FollowRow;

#[derive(Debug, Default, Deserialize)]
pub struct FollowRequest {
    pub following: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct FollowQuery {
    pub search: Option<String>,
}

impl FollowQuery {
    /// Lowercased search terms, split on whitespace and commas.
    pub fn terms(&self) -> Vec<String> {
        self.search
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
            .collect()
    }
}

#[derive(Debug, Serialize)]
pub struct FollowResponse {
    pub id: i64,
    pub user: String,
    pub following: String,
}

impl From<FollowRow> for FollowResponse {
    fn from(row: FollowRow) -> Self {
        Self {
            id: row.id,
            user: row.user_username,
            following: row.following_username,
        }
    }
}
