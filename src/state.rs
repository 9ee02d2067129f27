/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - store: Arc<dyn Store>, auth: AuthService, public_base_url
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 * - リクエストごとの identity はここに置かない (AuthCtx → extensions)
 */
use std::sync::Arc;

use crate::repos::Store;
use crate::services::auth::AuthService;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub auth: Arc<AuthService>,
    pub public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn Store>,
        auth: Arc<AuthService>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            store,
            auth,
            public_base_url,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("auth", &self.auth)
            .field("public_base_url", &self.public_base_url)
            .finish_non_exhaustive()
    }
}
