use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by token verification + strict claim validation.
#[derive(Debug, Error)]
pub enum AccessJwtError {
    #[error("jwt verification failed: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
    #[error("empty '{0}' claim")]
    EmptyClaim(&'static str),
    #[error("invalid 'sub' (expected UUID)")]
    InvalidSubUuid,
    #[error("unexpected token_type: expected {expected:?}, got {actual:?}")]
    WrongTokenType {
        expected: TokenType,
        actual: TokenType,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// Claims carried by both access and refresh tokens; `token_type` tells them apart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    pub iss: String,
    pub aud: String,
    pub sub: String,
    pub exp: u64,
    pub iat: u64,
    pub jti: String,
    pub token_type: TokenType,
}

/// 検証済み・アプリ側で使う型
///
/// - `sub` はプロジェクト規約として UUID なので、ここでは `Uuid` に昇格させる
#[derive(Debug, Clone)]
pub struct VerifiedToken {
    pub user_id: Uuid,
    pub jti: String,
    pub token_type: TokenType,
}

/// EdDSA (Ed25519) token verifier.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl TokenVerifier {
    pub fn new(
        public_key_pem: &str,
        issuer: &str,
        audience: &str,
        leeway_seconds: u64,
    ) -> Result<Self, String> {
        let decoding_key = DecodingKey::from_ed_pem(public_key_pem.as_bytes())
            .map_err(|e| format!("invalid ed25519 public key pem: {}", e))?;

        let mut validation = Validation::new(Algorithm::EdDSA);
        validation.set_issuer(&[issuer]);
        validation.set_audience(&[audience]);
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }

    /// Verify signature + `exp` / `iss` / `aud`, then check the remaining claims are usable.
    pub fn verify(&self, token: &str) -> Result<VerifiedToken, AccessJwtError> {
        let claims =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?
                .claims;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }
        if claims.jti.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("jti"));
        }

        // Project convention: subject is a UUID
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AccessJwtError::InvalidSubUuid)?;

        Ok(VerifiedToken {
            user_id,
            jti: claims.jti,
            token_type: claims.token_type,
        })
    }

    /// Same as [`verify`](Self::verify) but also pins the token type.
    pub fn verify_as(
        &self,
        token: &str,
        expected: TokenType,
    ) -> Result<VerifiedToken, AccessJwtError> {
        let verified = self.verify(token)?;
        if verified.token_type != expected {
            return Err(AccessJwtError::WrongTokenType {
                expected,
                actual: verified.token_type,
            });
        }
        Ok(verified)
    }
}
