/*
 * Responsibility
 * - Posts の request/response DTO
 * - request に author は無い (送られてきても serde が捨てる)
 * - image / group は tri-state: 未指定 = 変更なし, null = クリア, 値 = 設定
 */
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_text, deserialize_some};
use crate::error::AppError;
use crate::repos::post_repo::PostRow;

/// Body for POST / PUT / PATCH. Which fields are required depends on `partial`.
#[derive(Debug, Default, Deserialize)]
pub struct PostRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub text: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub image: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub group: Option<Option<i64>>,
}

impl PostRequest {
    pub fn validate(&self, partial: bool) -> Result<(), AppError> {
        check_text("text", self.text.as_ref().map(Option::as_deref), partial)
    }

    /// Group the request points at, if any. `null` and missing both mean none.
    pub fn group_id(&self) -> Option<i64> {
        self.group.flatten()
    }
}

#[derive(Debug, Serialize)]
pub struct PostResponse {
    pub id: i64,
    pub text: String,
    pub author: String, // username
    pub image: Option<String>,
    pub group: Option<i64>,
    pub pub_date: DateTime<Utc>,
}

impl From<PostRow> for PostResponse {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            text: row.text,
            author: row.author_username,
            image: row.image,
            group: row.group_id,
            pub_date: row.pub_date,
        }
    }
}
