/*
 * Responsibility
 * - handler 引数として使う extractor を束ねる
 */
mod api_json;
mod api_query;
mod auth_ctx;
pub mod path_id;
mod request_url;

pub use api_json::ApiJson;
pub use api_query::ApiQuery;
pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use request_url::RequestUrl;
