//! Account registration.
use tracing::debug;

use crate::api::v1::dto::users::RegisterRequest;
use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::user_repo::UserRow;
use crate::repos::Store;
use crate::services::auth::password::hash_password;

pub const USERNAME_TAKEN: &str = "A user with that username already exists.";

pub async fn register(store: &dyn Store, req: RegisterRequest) -> Result<UserRow, AppError> {
    let (username, password) = req.validate()?;

    if store.find_user_by_username(username).await?.is_some() {
        return Err(AppError::invalid_field("username", USERNAME_TAKEN));
    }

    let password_hash = hash_password(password).await?;
    let user = store
        .create_user(username, &password_hash)
        .await
        .map_err(|e| match e {
            RepoError::Conflict => AppError::invalid_field("username", USERNAME_TAKEN),
            other => other.into(),
        })?;

    debug!(user_id = %user.id, "user registered");
    Ok(user)
}
