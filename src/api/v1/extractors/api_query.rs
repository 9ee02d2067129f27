/*
 * Responsibility
 * - query string を T に変換し、rejection を AppError (400 INVALID_QUERY) に揃える
 * - 同じ key が複数回あるときは最後の値を使う (?limit=2&limit=3 → limit=3)
 */
use axum::{extract::FromRequestParts, http::request::Parts};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use url::form_urlencoded;

use crate::error::AppError;

pub struct ApiQuery<T>(pub T);

fn last_values(query: &str) -> Map<String, Value> {
    form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), Value::String(v.into_owned())))
        .collect()
}

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let params = last_values(parts.uri.query().unwrap_or_default());

        serde_json::from_value(Value::Object(params))
            .map(Self)
            .map_err(|err| {
                tracing::debug!(error = %err, "rejected query string");
                AppError::bad_request("INVALID_QUERY", err.to_string())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_key_keeps_the_last_value() {
        let params = last_values("limit=2&offset=1&limit=3&search=a%20b");
        assert_eq!(params["limit"], "3");
        assert_eq!(params["offset"], "1");
        assert_eq!(params["search"], "a b");
        assert!(last_values("").is_empty());
    }
}
