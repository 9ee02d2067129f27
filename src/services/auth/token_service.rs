use uuid::Uuid;

use crate::error::AppError;
use crate::services::auth::access_jwt::{
    AccessJwtError, TokenClaims, TokenType, TokenVerifier, VerifiedToken,
};
use crate::services::auth::jwt::JwtIssuer;

/// Issues and verifies access / refresh tokens.
///
/// Both token kinds are stateless JWTs signed with the same key; `token_type`
/// keeps a refresh token from being accepted as an access token.
#[derive(Clone, Debug)]
pub struct AuthService {
    issuer: JwtIssuer,
    verifier: TokenVerifier,
    access_token_ttl_seconds: u64,
    refresh_token_ttl_seconds: u64,
}

/// Service-level return type to keep handlers thin.
#[derive(Clone, Debug)]
pub struct IssuedTokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

impl AuthService {
    pub fn new(
        issuer: JwtIssuer,
        verifier: TokenVerifier,
        access_token_ttl_seconds: u64,
        refresh_token_ttl_seconds: u64,
    ) -> Self {
        Self {
            issuer,
            verifier,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
        }
    }

    fn issue(&self, user_id: Uuid, token_type: TokenType) -> Result<String, AppError> {
        let ttl = match token_type {
            TokenType::Access => self.access_token_ttl_seconds,
            TokenType::Refresh => self.refresh_token_ttl_seconds,
        };
        let now = chrono::Utc::now().timestamp().max(0) as u64;

        let claims = TokenClaims {
            iss: self.issuer.issuer().to_string(),
            aud: self.issuer.audience().to_string(),
            sub: user_id.to_string(),
            exp: now + ttl,
            iat: now,
            jti: Uuid::new_v4().to_string(),
            token_type,
        };

        self.issuer.sign(&claims)
    }

    pub fn issue_access_token(&self, user_id: Uuid) -> Result<String, AppError> {
        self.issue(user_id, TokenType::Access)
    }

    pub fn issue_token_pair(&self, user_id: Uuid) -> Result<IssuedTokenPair, AppError> {
        Ok(IssuedTokenPair {
            access_token: self.issue(user_id, TokenType::Access)?,
            refresh_token: self.issue(user_id, TokenType::Refresh)?,
        })
    }

    /// Entry-point for the access middleware.
    pub fn verify_access(&self, token: &str) -> Result<VerifiedToken, AccessJwtError> {
        self.verifier.verify_as(token, TokenType::Access)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<VerifiedToken, AccessJwtError> {
        self.verifier.verify_as(token, TokenType::Refresh)
    }

    /// Accepts either token type (`/jwt/verify`).
    pub fn verify_any(&self, token: &str) -> Result<VerifiedToken, AccessJwtError> {
        self.verifier.verify(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support;

    #[test]
    fn access_token_round_trips_to_user_id() {
        let auth = test_support::auth_service();
        let user_id = Uuid::new_v4();

        let token = auth.issue_access_token(user_id).unwrap();
        let verified = auth.verify_access(&token).unwrap();

        assert_eq!(verified.user_id, user_id);
        assert_eq!(verified.token_type, TokenType::Access);
    }

    #[test]
    fn refresh_token_is_not_an_access_token() {
        let auth = test_support::auth_service();
        let pair = auth.issue_token_pair(Uuid::new_v4()).unwrap();

        assert!(matches!(
            auth.verify_access(&pair.refresh_token),
            Err(AccessJwtError::WrongTokenType { .. })
        ));
        assert!(auth.verify_refresh(&pair.refresh_token).is_ok());
        assert!(auth.verify_any(&pair.refresh_token).is_ok());
        assert!(auth.verify_refresh(&pair.access_token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let auth = test_support::auth_service();
        let mut token = auth.issue_access_token(Uuid::new_v4()).unwrap();
        token.push('x');

        assert!(matches!(
            auth.verify_access(&token),
            Err(AccessJwtError::Jwt(_))
        ));
    }

    #[test]
    fn foreign_audience_is_rejected() {
        let issuer = test_support::auth_service();
        let other = test_support::auth_service_for_audience("someone-else");
        let token = other.issue_access_token(Uuid::new_v4()).unwrap();

        assert!(issuer.verify_access(&token).is_err());
    }
}
