pub mod access_jwt;
pub mod factory;
pub mod jwt;
pub mod login;
pub mod password;
pub mod token_service;

pub use access_jwt::TokenVerifier;
pub use factory::build_auth_service;
pub use jwt::JwtIssuer;
pub use token_service::{AuthService, IssuedTokenPair};
