/*
 * Responsibility
 * - ページングの next/previous 用に、リクエストの絶対 URL を組み立てる
 * - PUBLIC_BASE_URL があればそれを優先し、無ければ forwarded / host header から推定する
 */
use axum::{
    extract::{FromRequestParts, OriginalUri},
    http::{HeaderMap, request::Parts},
};
use url::Url;

use crate::error::AppError;
use crate::state::AppState;

pub struct RequestUrl(pub Url);

fn first_header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

fn origin_from_headers(headers: &HeaderMap) -> String {
    let proto = first_header(headers, "x-forwarded-proto").unwrap_or("http");
    let host = first_header(headers, "x-forwarded-host")
        .or_else(|| first_header(headers, "host"))
        .unwrap_or("localhost");
    format!("{proto}://{host}")
}

pub(crate) fn absolute_url(
    public_base_url: Option<&str>,
    headers: &HeaderMap,
    path_and_query: &str,
) -> Result<Url, url::ParseError> {
    let base = match public_base_url {
        Some(base) => base.trim_end_matches('/').to_string(),
        None => origin_from_headers(headers),
    };
    Url::parse(&format!("{base}{path_and_query}"))
}

impl FromRequestParts<AppState> for RequestUrl {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        // nest() で prefix が削られるため、OriginalUri を優先する
        let uri = parts
            .extensions
            .get::<OriginalUri>()
            .map(|o| o.0.clone())
            .unwrap_or_else(|| parts.uri.clone());
        let path_and_query = uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("/");

        absolute_url(state.public_base_url.as_deref(), &parts.headers, path_and_query)
            .map(RequestUrl)
            .map_err(|err| {
                tracing::warn!(error = %err, "could not build absolute request url");
                AppError::bad_request("INVALID_HOST", "request host is not a valid url")
            })
    }
}
