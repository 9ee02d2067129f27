use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{check_text, deserialize_some};
use crate::error::AppError;
use crate::repos::comment_repo::CommentRow;

/// `post` and `author` in the body are ignored; both come from the path and the caller.
#[derive(Debug, Default, Deserialize)]
pub struct CommentRequest {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub text: Option<Option<String>>,
}

impl CommentRequest {
    pub fn validate(&self, partial: bool) -> Result<(), AppError> {
        check_text("text", self.text.as_ref().map(Option::as_deref), partial)
    }
}

#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub id: i64,
    pub author: String,
    pub post: i64,
    pub text: String,
    pub created: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            author: row.author_username,
            post: row.post_id,
            text: row.text,
            created: row.created,
        }
    }
}
