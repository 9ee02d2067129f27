/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - すべての route を末尾 "/" あり・なしの両方で登録する
 * - access middleware (任意認証) は resource 系 route に掛ける。users / jwt は対象外
 */
use axum::{
    Router,
    routing::{MethodRouter, delete, get, post},
};

use crate::middleware;
use crate::state::AppState;

use crate::api::v1::handlers::{
    comments::{
        create_comment, delete_comment, get_comment, list_comments, patch_comment, update_comment,
    },
    follows::{create_follow, delete_follow, list_follows},
    groups::{get_group, list_groups},
    health::health,
    posts::{create_post, delete_post, get_post, list_posts, patch_post, update_post},
    tokens::{create_token, refresh_token, verify_token},
    users::register_user,
};

fn route_both(
    router: Router<AppState>,
    path: &str,
    method_router: MethodRouter<AppState>,
) -> Router<AppState> {
    router
        .route(path, method_router.clone())
        .route(&format!("{path}/"), method_router)
}

fn table(routes: Vec<(&str, MethodRouter<AppState>)>) -> Router<AppState> {
    routes
        .into_iter()
        .fold(Router::new(), |router, (path, method_router)| {
            route_both(router, path, method_router)
        })
}

pub fn routes(state: AppState) -> Router<AppState> {
    let resources = table(vec![
        ("/health", get(health)),
        ("/posts", get(list_posts).post(create_post)),
        (
            "/posts/{post_id}",
            get(get_post)
                .put(update_post)
                .patch(patch_post)
                .delete(delete_post),
        ),
        (
            "/posts/{post_id}/comments",
            get(list_comments).post(create_comment),
        ),
        (
            "/posts/{post_id}/comments/{comment_id}",
            get(get_comment)
                .put(update_comment)
                .patch(patch_comment)
                .delete(delete_comment),
        ),
        ("/groups", get(list_groups)),
        ("/groups/{group_id}", get(get_group)),
        ("/follow", get(list_follows).post(create_follow)),
        ("/follow/{follow_id}", delete(delete_follow)),
    ]);

    // credentials 系は Authorization header を見ない (古い token でも login / refresh できる)
    let credentials = table(vec![
        ("/users", post(register_user)),
        ("/jwt/create", post(create_token)),
        ("/jwt/refresh", post(refresh_token)),
        ("/jwt/verify", post(verify_token)),
    ]);

    middleware::auth::access::apply(resources, state).merge(credentials)
}
