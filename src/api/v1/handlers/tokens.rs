/*
 * Responsibility
 * - /jwt/create, /jwt/refresh, /jwt/verify
 * - 検証ロジックは services::auth に置き、ここは入出力の変換だけ
 */
use axum::{Json, extract::State};

use crate::{
    api::v1::{
        dto::tokens::{
            AccessTokenResponse, EmptyResponse, TokenObtainRequest, TokenPairResponse,
            TokenRefreshRequest, TokenVerifyRequest,
        },
        extractors::ApiJson,
    },
    error::AppError,
    services::auth::login,
    state::AppState,
};

pub async fn create_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TokenObtainRequest>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let pair =
        login::obtain_token_pair(state.store.as_ref(), &state.auth, &req.username, &req.password)
            .await?;

    Ok(Json(TokenPairResponse {
        access: pair.access_token,
        refresh: pair.refresh_token,
    }))
}

pub async fn refresh_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TokenRefreshRequest>,
) -> Result<Json<AccessTokenResponse>, AppError> {
    let access = login::refresh_access_token(state.store.as_ref(), &state.auth, &req.refresh).await?;
    Ok(Json(AccessTokenResponse { access }))
}

pub async fn verify_token(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<TokenVerifyRequest>,
) -> Result<Json<EmptyResponse>, AppError> {
    state.auth.verify_any(&req.token).map_err(|err| {
        tracing::debug!(error = ?err, "token verify rejected");
        AppError::TokenNotValid
    })?;
    Ok(Json(EmptyResponse {}))
}

#[cfg(test)]
mod tests {
    use axum::http::Method;
    use serde_json::json;

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn register_login_refresh_verify() {
        let app = TestApp::new();

        let (status, user) = app
            .send(
                Method::POST,
                "/api/v1/users/",
                None,
                Some(json!({"username": "alice", "password": "correct-horse"})),
            )
            .await;
        assert_eq!(status, 201);
        assert_eq!(user["username"], "alice");
        assert!(user.get("password_hash").is_none());

        let (status, _) = app
            .send(
                Method::POST,
                "/api/v1/users",
                None,
                Some(json!({"username": "alice", "password": "another-one"})),
            )
            .await;
        assert_eq!(status, 400);

        let (status, body) = app
            .send(
                Method::POST,
                "/api/v1/jwt/create/",
                None,
                Some(json!({"username": "alice", "password": "wrong-horse"})),
            )
            .await;
        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "UNAUTHORIZED");

        let (status, pair) = app
            .send(
                Method::POST,
                "/api/v1/jwt/create/",
                None,
                Some(json!({"username": "alice", "password": "correct-horse"})),
            )
            .await;
        assert_eq!(status, 200);
        let access = pair["access"].as_str().unwrap().to_string();
        let refresh = pair["refresh"].as_str().unwrap().to_string();

        let (status, _) = app
            .send(Method::POST, "/api/v1/posts/", Some(&access), Some(json!({"text": "hi"})))
            .await;
        assert_eq!(status, 201);

        let (status, body) = app
            .send(Method::POST, "/api/v1/jwt/refresh/", None, Some(json!({"refresh": refresh})))
            .await;
        assert_eq!(status, 200);
        assert!(body["access"].is_string());

        let (status, _) = app
            .send(Method::POST, "/api/v1/jwt/refresh/", None, Some(json!({"refresh": access})))
            .await;
        assert_eq!(status, 401);

        let (status, body) = app
            .send(Method::POST, "/api/v1/jwt/verify/", None, Some(json!({"token": refresh})))
            .await;
        assert_eq!(status, 200);
        assert_eq!(body, json!({}));

        let (status, body) = app
            .send(Method::POST, "/api/v1/jwt/verify", None, Some(json!({"token": "nope"})))
            .await;
        assert_eq!(status, 401);
        assert_eq!(body["error"]["code"], "TOKEN_NOT_VALID");
    }
}
