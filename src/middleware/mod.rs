/*
 * Responsibility
 * - middleware の公開インターフェース
 * - auth::access は v1 router に、それ以外は app.rs で全体に掛ける
 */
pub mod auth;
pub mod cors;
pub mod http;
pub mod security_headers;
