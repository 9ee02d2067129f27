/*
 * Responsibility
 * - Path の String を内部 ID (i64) として受け取る
 * - 数字のみ (\d+) を受け付け、それ以外は対象リソースの 404 にする
 * 置くもの
 *  - PathId<T> の定義（ジェネリック本体）
 *  - impl FromRequestParts<AppState> for PathId<T>
 * 置かないもの
 *  - Post / Comment といった具体リソース名 (types.rs 側)
 */
use std::collections::HashMap;
use std::marker::PhantomData;

use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use crate::error::AppError;
use crate::state::AppState;

/// Binds a tag type to its route parameter and the resource named in 404s.
pub trait PathResource {
    const PARAM: &'static str;
    const RESOURCE: &'static str;
}

pub struct PathId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PathId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> Clone for PathId<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for PathId<T> {}

pub(crate) fn parse_digits(raw: &str) -> Option<i64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

impl<T> FromRequestParts<AppState> for PathId<T>
where
    T: PathResource + Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::not_found(T::RESOURCE))?;

        params
            .get(T::PARAM)
            .and_then(|raw| parse_digits(raw))
            .map(Self::new)
            .ok_or_else(|| AppError::not_found(T::RESOURCE))
    }
}

impl<T> std::fmt::Debug for PathId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathId").field("id", &self.id).finish()
    }
}
