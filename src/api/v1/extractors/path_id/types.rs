/**
 * Responsibility
 *
 * 主な責務
 *  - リソースごとの「意味付きID型」を宣言する
 *
 * 置くもの
 *  - PostTag, CommentTag などのタグ型
 *  - type PostId = PathId<PostTag> のような alias
 *
 * 置かないもの
 *  - parse ロジック
 *  - extractor 実装
 */
use super::core::{PathId, PathResource};

// posts
pub enum PostTag {}
impl PathResource for PostTag {
    const PARAM: &'static str = "post_id";
    const RESOURCE: &'static str = "post";
}
pub type PostId = PathId<PostTag>;

// comments (posts/{post_id}/comments/{comment_id})
pub enum CommentTag {}
impl PathResource for CommentTag {
    const PARAM: &'static str = "comment_id";
    const RESOURCE: &'static str = "comment";
}
pub type CommentId = PathId<CommentTag>;

// groups
pub enum GroupTag {}
impl PathResource for GroupTag {
    const PARAM: &'static str = "group_id";
    const RESOURCE: &'static str = "group";
}
pub type GroupId = PathId<GroupTag>;

// follows
pub enum FollowTag {}
impl PathResource for FollowTag {
    const PARAM: &'static str = "follow_id";
    const RESOURCE: &'static str = "follow";
}
pub type FollowId = PathId<FollowTag>;
