//! Credential exchange: username/password → token pair, refresh → access.
use tracing::{debug, warn};

use crate::error::AppError;
use crate::repos::Store;
use crate::services::auth::password::verify_password;
use crate::services::auth::{AuthService, IssuedTokenPair};

/// Bad username and bad password are indistinguishable to the caller.
pub async fn obtain_token_pair(
    store: &dyn Store,
    auth: &AuthService,
    username: &str,
    password: &str,
) -> Result<IssuedTokenPair, AppError> {
    let Some(user) = store.find_user_by_username(username).await? else {
        debug!(username = %username, "login for unknown username");
        return Err(AppError::InvalidCredentials);
    };

    if !verify_password(password, &user.password_hash).await? {
        debug!(user_id = %user.id, "login with wrong password");
        return Err(AppError::InvalidCredentials);
    }

    auth.issue_token_pair(user.id)
}

/// Issue a fresh access token for a still-existing user. The refresh token is not rotated.
pub async fn refresh_access_token(
    store: &dyn Store,
    auth: &AuthService,
    refresh_token: &str,
) -> Result<String, AppError> {
    let verified = auth.verify_refresh(refresh_token).map_err(|err| {
        warn!(error = ?err, "refresh token verification failed");
        AppError::TokenNotValid
    })?;

    if store.get_user(verified.user_id).await?.is_none() {
        debug!(user_id = %verified.user_id, "refresh for deleted user");
        return Err(AppError::TokenNotValid);
    }

    auth.issue_access_token(verified.user_id)
}
