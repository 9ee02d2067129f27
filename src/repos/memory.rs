//! In-memory store used by tests.
//!
//! All tables live behind a single [`RwLock`], so check-then-insert sequences
//! (username / follow pair uniqueness) are atomic the same way the Postgres
//! UNIQUE constraints are.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::repos::comment_repo::{CommentRepo, CommentRow, NewComment};
use crate::repos::error::{RepoError, RepoResult};
use crate::repos::follow_repo::{FollowRepo, FollowRow};
use crate::repos::group_repo::{GroupRepo, GroupRow};
use crate::repos::post_repo::{NewPost, PostChanges, PostRepo, PostRow};
use crate::repos::user_repo::{UserRepo, UserRow};
use crate::repos::Page;

#[derive(Debug, Clone)]
struct PostRecord {
    text: String,
    author_id: Uuid,
    image: Option<String>,
    group_id: Option<i64>,
    pub_date: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct CommentRecord {
    author_id: Uuid,
    post_id: i64,
    text: String,
    created: chrono::DateTime<Utc>,
}

#[derive(Debug, Clone, Copy)]
struct FollowRecord {
    user_id: Uuid,
    following_id: Uuid,
}

#[derive(Default)]
struct Inner {
    users: BTreeMap<Uuid, UserRow>,
    groups: BTreeMap<i64, GroupRow>,
    posts: BTreeMap<i64, PostRecord>,
    comments: BTreeMap<i64, CommentRecord>,
    follows: BTreeMap<i64, FollowRecord>,
    next_id: i64,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn username(&self, user_id: Uuid) -> RepoResult<String> {
        self.users
            .get(&user_id)
            .map(|u| u.username.clone())
            .ok_or(RepoError::MissingReference)
    }

    fn post_row(&self, id: i64, p: &PostRecord) -> RepoResult<PostRow> {
        Ok(PostRow {
            id,
            text: p.text.clone(),
            author_id: p.author_id,
            author_username: self.username(p.author_id)?,
            image: p.image.clone(),
            group_id: p.group_id,
            pub_date: p.pub_date,
        })
    }

    fn comment_row(&self, id: i64, c: &CommentRecord) -> RepoResult<CommentRow> {
        Ok(CommentRow {
            id,
            author_id: c.author_id,
            author_username: self.username(c.author_id)?,
            post_id: c.post_id,
            text: c.text.clone(),
            created: c.created,
        })
    }

    fn follow_row(&self, id: i64, f: &FollowRecord) -> RepoResult<FollowRow> {
        Ok(FollowRow {
            id,
            user_id: f.user_id,
            user_username: self.username(f.user_id)?,
            following_username: self.username(f.following_id)?,
        })
    }
}

#[derive(Default)]
pub struct MemoryRepo {
    inner: RwLock<Inner>,
    stale_follow_reads: AtomicBool,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Inner> {
        self.inner.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, Inner> {
        self.inner.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Groups are created out-of-band in production; tests seed them here.
    pub fn insert_group(&self, title: &str, slug: &str, description: &str) -> GroupRow {
        let mut inner = self.write();
        let id = inner.next_id();
        let row = GroupRow {
            id,
            title: title.to_string(),
            slug: slug.to_string(),
            description: description.to_string(),
        };
        inner.groups.insert(id, row.clone());
        row
    }

    /// `follow_exists` answers `false` from now on, as if another request inserted
    /// the edge between the read and the write. `create_follow` still enforces the pair.
    pub fn simulate_stale_follow_reads(&self) {
        self.stale_follow_reads.store(true, Ordering::SeqCst);
    }

    pub fn follow_count(&self) -> usize {
        self.read().follows.len()
    }

    pub fn comment_count(&self) -> usize {
        self.read().comments.len()
    }
}

#[async_trait]
impl UserRepo for MemoryRepo {
    async fn create_user(&self, username: &str, password_hash: &str) -> RepoResult<UserRow> {
        let mut inner = self.write();
        if inner.users.values().any(|u| u.username == username) {
            return Err(RepoError::Conflict);
        }
        let row = UserRow {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
        };
        inner.users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get_user(&self, user_id: Uuid) -> RepoResult<Option<UserRow>> {
        Ok(self.read().users.get(&user_id).cloned())
    }

    async fn find_user_by_username(&self, username: &str) -> RepoResult<Option<UserRow>> {
        Ok(self
            .read()
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl PostRepo for MemoryRepo {
    async fn list_posts(&self, page: Option<Page>) -> RepoResult<Vec<PostRow>> {
        let inner = self.read();
        let (skip, take) = match page {
            Some(p) => (p.offset as usize, p.limit as usize),
            None => (0, usize::MAX),
        };
        inner
            .posts
            .iter()
            .skip(skip)
            .take(take)
            .map(|(id, p)| inner.post_row(*id, p))
            .collect()
    }

    async fn count_posts(&self) -> RepoResult<i64> {
        Ok(self.read().posts.len() as i64)
    }

    async fn get_post(&self, post_id: i64) -> RepoResult<Option<PostRow>> {
        let inner = self.read();
        inner
            .posts
            .get(&post_id)
            .map(|p| inner.post_row(post_id, p))
            .transpose()
    }

    async fn create_post(&self, new: &NewPost) -> RepoResult<PostRow> {
        let mut inner = self.write();
        if !inner.users.contains_key(&new.author_id) {
            return Err(RepoError::MissingReference);
        }
        if let Some(group_id) = new.group_id
            && !inner.groups.contains_key(&group_id)
        {
            return Err(RepoError::MissingReference);
        }
        let id = inner.next_id();
        let record = PostRecord {
            text: new.text.clone(),
            author_id: new.author_id,
            image: new.image.clone(),
            group_id: new.group_id,
            pub_date: Utc::now(),
        };
        let row = inner.post_row(id, &record)?;
        inner.posts.insert(id, record);
        Ok(row)
    }

    async fn update_post(
        &self,
        post_id: i64,
        changes: &PostChanges,
    ) -> RepoResult<Option<PostRow>> {
        let mut inner = self.write();
        if let Some(Some(group_id)) = changes.group_id
            && !inner.groups.contains_key(&group_id)
        {
            return Err(RepoError::MissingReference);
        }
        let Some(record) = inner.posts.get_mut(&post_id) else {
            return Ok(None);
        };
        if let Some(text) = &changes.text {
            record.text = text.clone();
        }
        if let Some(image) = &changes.image {
            record.image = image.clone();
        }
        if let Some(group_id) = changes.group_id {
            record.group_id = group_id;
        }
        let record = record.clone();
        inner.post_row(post_id, &record).map(Some)
    }

    async fn delete_post(&self, post_id: i64) -> RepoResult<bool> {
        let mut inner = self.write();
        let deleted = inner.posts.remove(&post_id).is_some();
        if deleted {
            // ON DELETE CASCADE
            inner.comments.retain(|_, c| c.post_id != post_id);
        }
        Ok(deleted)
    }
}

#[async_trait]
impl CommentRepo for MemoryRepo {
    async fn list_comments(&self, post_id: i64) -> RepoResult<Vec<CommentRow>> {
        let inner = self.read();
        inner
            .comments
            .iter()
            .filter(|(_, c)| c.post_id == post_id)
            .map(|(id, c)| inner.comment_row(*id, c))
            .collect()
    }

    async fn get_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<Option<CommentRow>> {
        let inner = self.read();
        inner
            .comments
            .get(&comment_id)
            .filter(|c| c.post_id == post_id)
            .map(|c| inner.comment_row(comment_id, c))
            .transpose()
    }

    async fn create_comment(&self, new: &NewComment) -> RepoResult<CommentRow> {
        let mut inner = self.write();
        if !inner.posts.contains_key(&new.post_id) || !inner.users.contains_key(&new.author_id) {
            return Err(RepoError::MissingReference);
        }
        let id = inner.next_id();
        let record = CommentRecord {
            author_id: new.author_id,
            post_id: new.post_id,
            text: new.text.clone(),
            created: Utc::now(),
        };
        let row = inner.comment_row(id, &record)?;
        inner.comments.insert(id, record);
        Ok(row)
    }

    async fn update_comment(
        &self,
        post_id: i64,
        comment_id: i64,
        text: Option<&str>,
    ) -> RepoResult<Option<CommentRow>> {
        let mut inner = self.write();
        let Some(record) = inner
            .comments
            .get_mut(&comment_id)
            .filter(|c| c.post_id == post_id)
        else {
            return Ok(None);
        };
        if let Some(text) = text {
            record.text = text.to_string();
        }
        let record = record.clone();
        inner.comment_row(comment_id, &record).map(Some)
    }

    async fn delete_comment(&self, post_id: i64, comment_id: i64) -> RepoResult<bool> {
        let mut inner = self.write();
        let belongs = inner
            .comments
            .get(&comment_id)
            .is_some_and(|c| c.post_id == post_id);
        if belongs {
            inner.comments.remove(&comment_id);
        }
        Ok(belongs)
    }
}

#[async_trait]
impl GroupRepo for MemoryRepo {
    async fn list_groups(&self) -> RepoResult<Vec<GroupRow>> {
        Ok(self.read().groups.values().cloned().collect())
    }

    async fn get_group(&self, group_id: i64) -> RepoResult<Option<GroupRow>> {
        Ok(self.read().groups.get(&group_id).cloned())
    }
}

#[async_trait]
impl FollowRepo for MemoryRepo {
    async fn list_follows(
        &self,
        user_id: Uuid,
        following_terms: &[String],
    ) -> RepoResult<Vec<FollowRow>> {
        let inner = self.read();
        let mut rows = Vec::new();
        for (id, f) in inner.follows.iter().filter(|(_, f)| f.user_id == user_id) {
            let row = inner.follow_row(*id, f)?;
            let name = row.following_username.to_lowercase();
            if following_terms.iter().all(|t| *t == name) {
                rows.push(row);
            }
        }
        Ok(rows)
    }

    async fn follow_exists(&self, user_id: Uuid, following_id: Uuid) -> RepoResult<bool> {
        if self.stale_follow_reads.load(Ordering::SeqCst) {
            return Ok(false);
        }
        Ok(self
            .read()
            .follows
            .values()
            .any(|f| f.user_id == user_id && f.following_id == following_id))
    }

    async fn get_follow(&self, follow_id: i64) -> RepoResult<Option<FollowRow>> {
        let inner = self.read();
        inner
            .follows
            .get(&follow_id)
            .map(|f| inner.follow_row(follow_id, f))
            .transpose()
    }

    async fn create_follow(&self, user_id: Uuid, following_id: Uuid) -> RepoResult<FollowRow> {
        let mut inner = self.write();
        if inner
            .follows
            .values()
            .any(|f| f.user_id == user_id && f.following_id == following_id)
        {
            return Err(RepoError::Conflict);
        }
        let id = inner.next_id();
        let record = FollowRecord {
            user_id,
            following_id,
        };
        let row = inner.follow_row(id, &record)?;
        inner.follows.insert(id, record);
        Ok(row)
    }

    async fn delete_follow(&self, follow_id: i64) -> RepoResult<bool> {
        Ok(self.write().follows.remove(&follow_id).is_some())
    }
}
