/// Factory: build `AuthService` from application `Config`.
use std::sync::Arc;

use tracing::error;

use crate::config::Config;
use crate::error::AppError;
use crate::services::auth::{AuthService, JwtIssuer, TokenVerifier};

pub fn build_auth_service(config: &Config) -> Result<Arc<AuthService>, AppError> {
    let issuer = JwtIssuer::new(
        &config.access_jwt_private_key_pem,
        config.auth_issuer.clone(),
        config.auth_audience.clone(),
    )?;

    let verifier = TokenVerifier::new(
        &config.access_jwt_public_key_pem,
        &config.auth_issuer,
        &config.auth_audience,
        config.access_token_leeway_seconds,
    )
    .map_err(|e| {
        error!(error = %e, "failed to build access token verifier");
        AppError::Internal
    })?;

    Ok(Arc::new(AuthService::new(
        issuer,
        verifier,
        config.access_token_ttl_seconds,
        config.refresh_token_ttl_seconds,
    )))
}
