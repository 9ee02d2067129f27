//! access token (JWT) 検証 → AuthCtx を extensions に入れる
//!
//! - Authorization header が無い: 匿名としてそのまま通す (401 を返すかは extractor 側)
//! - header があるが形式不正 / 検証失敗: どの route でも 401
//! - 検証成功: `AuthCtx` を request extensions に格納する
//!
//! 受け付けるのは `token_type == "access"` の token だけ。

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::state::AppState;

/// `/api/v1/*` に認証を掛けるための middleware を適用する。
///
/// 例：
/// ```ignore
/// let v1 = middleware::auth::access::apply(v1, state.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

fn bearer_token(value: &str) -> Option<&str> {
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

async fn access_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(value) = req.headers().get(header::AUTHORIZATION).cloned() else {
        return Ok(next.run(req).await);
    };

    let token = value
        .to_str()
        .ok()
        .and_then(bearer_token)
        .ok_or_else(|| {
            tracing::warn!("malformed authorization header");
            AppError::Unauthorized
        })?;

    // JWT 署名検証 + iss/aud/exp/leeway/token_type は AuthService 側で実施
    let verified = match state.auth.verify_access(token) {
        Ok(verified) => verified,
        Err(err) => {
            tracing::warn!(error = ?err, "access token verification failed");
            return Err(AppError::TokenNotValid);
        }
    };

    let auth_ctx = AuthCtx::new(verified.user_id).with_jti(verified.jti);
    tracing::debug!(user_id = %auth_ctx.user_id, jti = ?auth_ctx.jti, "authenticated request");

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(auth_ctx);

    Ok(next.run(req).await)
}
