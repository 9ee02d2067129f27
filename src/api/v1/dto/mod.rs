/*
 * Responsibility
 * - request/response DTO (serde) をリソースごとに束ねる
 * - request DTO は author/user を持たない。作成者は常に AuthCtx から決まる
 */
pub mod comments;
pub mod follows;
pub mod groups;
pub mod pagination;
pub mod posts;
pub mod tokens;
pub mod users;

use serde::{Deserialize, Deserializer};

use crate::error::AppError;

/// Tri-state field helper: missing → `None`, `null` → `Some(None)`, value → `Some(Some(v))`.
///
/// Use together with `#[serde(default)]`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub(crate) const REQUIRED: &str = "This field is required.";
pub(crate) const BLANK: &str = "This field may not be blank.";
pub(crate) const NULL: &str = "This field may not be null.";

/// Required-ness / null / blankness of a tri-state text field, shared by posts and comments.
pub(crate) fn check_text(
    field: &'static str,
    value: Option<Option<&str>>,
    partial: bool,
) -> Result<(), AppError> {
    match value {
        None if !partial => Err(AppError::invalid_field(field, REQUIRED)),
        Some(None) => Err(AppError::invalid_field(field, NULL)),
        Some(Some(v)) if v.trim().is_empty() => Err(AppError::invalid_field(field, BLANK)),
        _ => Ok(()),
    }
}
