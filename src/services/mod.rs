/*
 * Responsibility
 * - ドメインごとのルール (検証・認可) を handler から切り離す
 * - すべて `&dyn Store` と明示的な AuthCtx を受け取る
 */
pub mod auth;
pub mod comments;
pub mod follows;
pub mod groups;
pub mod policy;
pub mod posts;
pub mod users;
