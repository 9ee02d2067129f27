/*
 * Responsibility
 * - 環境変数や設定の読み込み (DATABASE_URL, CORS 許可、Auth 設定など)
 * - 設定値のバリデーション (不足なら起動失敗)
 */
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    pub fn from_env() -> Self {
        Self::parse(&env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()))
    }

    fn parse(value: &str) -> Self {
        match value.to_ascii_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing configuration: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,

    pub database_url: String,
    pub database_max_connections: u32,
    pub run_migrations: bool,

    pub app_env: AppEnv,
    pub cors_allowed_origins: Vec<String>,
    // Used to build absolute pagination links behind a proxy
    pub public_base_url: Option<String>,

    pub auth_issuer: String,
    pub auth_audience: String,
    pub access_token_leeway_seconds: u64,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,

    // Ed25519 PKCS#8 PEM pair: the private key signs, the public key verifies
    pub access_jwt_private_key_pem: String,
    pub access_jwt_public_key_pem: String,
}

fn parse_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(v) if !v.trim().is_empty() => v.trim().parse().map_err(|_| ConfigError::Invalid(key)),
        _ => Ok(default),
    }
}

fn parse_bool_or(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env::var(key) {
        Ok(v) => match v.trim().to_ascii_lowercase().as_str() {
            "" => Ok(default),
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::Invalid(key)),
        },
        Err(_) => Ok(default),
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn pem(key: &'static str) -> Result<String, ConfigError> {
    // .env files usually carry PEMs on one line with literal "\n"
    Ok(required(key)?.replace("\\n", "\n"))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let port: u16 = parse_or("PORT", 3000)?;
        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let database_url = required("DATABASE_URL")?;
        let database_max_connections = parse_or("DATABASE_MAX_CONNECTIONS", 5)?;
        let run_migrations = parse_bool_or("RUN_MIGRATIONS", true)?;

        let app_env = AppEnv::from_env();

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let public_base_url = match env::var("PUBLIC_BASE_URL") {
            Ok(v) if !v.trim().is_empty() => {
                let v = v.trim().trim_end_matches('/').to_string();
                url::Url::parse(&v).map_err(|_| ConfigError::Invalid("PUBLIC_BASE_URL"))?;
                Some(v)
            }
            _ => None,
        };

        let auth_issuer = required("AUTH_ISSUER")?;
        let auth_audience = required("AUTH_AUDIENCE")?;
        let access_token_leeway_seconds = parse_or("ACCESS_TOKEN_LEEWAY_SECONDS", 60)?;
        let access_token_ttl_seconds = parse_or("ACCESS_TOKEN_TTL_SECONDS", 86_400)?; // 1 day
        let refresh_token_ttl_seconds = parse_or("REFRESH_TOKEN_TTL_SECONDS", 604_800)?; // 7 days

        if access_token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("ACCESS_TOKEN_TTL_SECONDS"));
        }
        if refresh_token_ttl_seconds == 0 {
            return Err(ConfigError::Invalid("REFRESH_TOKEN_TTL_SECONDS"));
        }

        let access_jwt_private_key_pem = pem("ACCESS_JWT_PRIVATE_KEY_PEM")?;
        let access_jwt_public_key_pem = pem("ACCESS_JWT_PUBLIC_KEY_PEM")?;

        Ok(Self {
            addr,
            database_url,
            database_max_connections,
            run_migrations,
            app_env,
            cors_allowed_origins,
            public_base_url,
            auth_issuer,
            auth_audience,
            access_token_leeway_seconds,
            access_token_ttl_seconds,
            refresh_token_ttl_seconds,
            access_jwt_private_key_pem,
            access_jwt_public_key_pem,
        })
    }
}
