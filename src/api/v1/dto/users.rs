/*
 * Responsibility
 * - Users (登録) の request/response DTO
 * - password_hash は response に含めない
 */
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{BLANK, REQUIRED};
use crate::error::AppError;
use crate::repos::user_repo::UserRow;

pub const USERNAME_MAX_LEN: usize = 150;
pub const PASSWORD_MIN_LEN: usize = 8;

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl RegisterRequest {
    /// Returns `(username, password)` once both pass the field rules.
    pub fn validate(&self) -> Result<(&str, &str), AppError> {
        let username = self
            .username
            .as_deref()
            .ok_or_else(|| AppError::invalid_field("username", REQUIRED))?;
        if username.is_empty() {
            return Err(AppError::invalid_field("username", BLANK));
        }
        if username.chars().count() > USERNAME_MAX_LEN {
            return Err(AppError::invalid_field(
                "username",
                format!("Ensure this field has no more than {USERNAME_MAX_LEN} characters."),
            ));
        }
        if !username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@.+-_".contains(c))
        {
            return Err(AppError::invalid_field(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            ));
        }

        let password = self
            .password
            .as_deref()
            .ok_or_else(|| AppError::invalid_field("password", REQUIRED))?;
        if password.chars().count() < PASSWORD_MIN_LEN {
            return Err(AppError::invalid_field(
                "password",
                format!("This password is too short. It must contain at least {PASSWORD_MIN_LEN} characters."),
            ));
        }
        if password.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::invalid_field(
                "password",
                "This password is entirely numeric.",
            ));
        }

        Ok((username, password))
    }
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
}

impl From<UserRow> for UserResponse {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
        }
    }
}
