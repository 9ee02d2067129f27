/*
 * Responsibility
 * - LimitOffset 方式のページング (query の解釈と response envelope)
 * - next / previous は絶対 URL。元の query parameter は保持する
 *
 * Notes
 * - limit が正の整数でないときはページングしない (呼び出し側で素の配列を返す)
 */
use serde::{Deserialize, Serialize};
use url::Url;

use crate::repos::Page;

/// Raw strings so that malformed values fall back instead of rejecting the request.
#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl PageQuery {
    pub fn page(&self) -> Option<Page> {
        let limit = self
            .limit
            .as_deref()?
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|l| *l > 0)?;
        let offset = self
            .offset
            .as_deref()
            .and_then(|o| o.trim().parse::<i64>().ok())
            .filter(|o| *o >= 0)
            .unwrap_or(0);

        Some(Page { limit, offset })
    }
}

#[derive(Debug, Serialize)]
pub struct Paginated<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Paginated<T> {
    pub fn new(results: Vec<T>, count: i64, page: Page, request_url: &Url) -> Self {
        let Page { limit, offset } = page;

        // offset + limit past i64::MAX is beyond any count
        let next = offset
            .checked_add(limit)
            .filter(|end| *end < count)
            .map(|end| with_window(request_url, limit, Some(end)));

        let previous = (offset > 0).then(|| {
            let prev = offset - limit;
            with_window(request_url, limit, (prev > 0).then_some(prev))
        });

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Rewrites `limit` / `offset`, keeping every other query parameter. `offset: None` drops it.
fn with_window(url: &Url, limit: i64, offset: Option<i64>) -> String {
    let mut url = url.clone();
    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "limit" && k != "offset")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();

    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        pairs.extend_pairs(kept);
        pairs.append_pair("limit", &limit.to_string());
        if let Some(offset) = offset {
            pairs.append_pair("offset", &offset.to_string());
        }
    }

    url.to_string()
}
