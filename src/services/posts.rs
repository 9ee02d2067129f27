/*
 * Responsibility
 * - Post の CRUD ルール (検証順: 404 → 403 → 400 → write)
 * - 作成者は常に actor。request 側からは受け取らない
 */
use tracing::debug;

use crate::api::v1::dto::posts::PostRequest;
use crate::api::v1::extractors::AuthCtx;
use crate::error::AppError;
use crate::repos::error::RepoError;
use crate::repos::post_repo::{NewPost, PostChanges, PostRow};
use crate::repos::{Page, Store};
use crate::services::policy::ensure_owner;

pub async fn list(store: &dyn Store) -> Result<Vec<PostRow>, AppError> {
    Ok(store.list_posts(None).await?)
}

/// Returns `(count, rows)` for one LimitOffset window.
pub async fn list_page(store: &dyn Store, page: Page) -> Result<(i64, Vec<PostRow>), AppError> {
    let count = store.count_posts().await?;
    let rows = store.list_posts(Some(page)).await?;
    Ok((count, rows))
}

pub async fn retrieve(store: &dyn Store, post_id: i64) -> Result<PostRow, AppError> {
    store
        .get_post(post_id)
        .await?
        .ok_or_else(|| AppError::not_found("post"))
}

fn unknown_group(group_id: i64) -> AppError {
    AppError::invalid_field(
        "group",
        format!("Invalid pk \"{group_id}\" - object does not exist."),
    )
}

async fn ensure_group_exists(store: &dyn Store, group_id: Option<i64>) -> Result<(), AppError> {
    let Some(group_id) = group_id else {
        return Ok(());
    };
    match store.get_group(group_id).await? {
        Some(_) => Ok(()),
        None => Err(unknown_group(group_id)),
    }
}

pub async fn create(
    store: &dyn Store,
    actor: &AuthCtx,
    req: PostRequest,
) -> Result<PostRow, AppError> {
    req.validate(false)?;
    let group_id = req.group_id();
    ensure_group_exists(store, group_id).await?;

    let new = NewPost {
        author_id: actor.user_id,
        text: req.text.flatten().unwrap_or_default(),
        image: req.image.flatten(),
        group_id,
    };

    let row = store.create_post(&new).await.map_err(|e| match e {
        // group 削除と競合した場合
        RepoError::MissingReference => group_id.map_or(AppError::Internal, unknown_group),
        other => other.into(),
    })?;

    debug!(post_id = row.id, author = %actor.user_id, "post created");
    Ok(row)
}

pub async fn update(
    store: &dyn Store,
    actor: &AuthCtx,
    post_id: i64,
    req: PostRequest,
    partial: bool,
) -> Result<PostRow, AppError> {
    let existing = retrieve(store, post_id).await?;
    ensure_owner(actor, &existing)?;
    req.validate(partial)?;

    if let Some(group_id) = req.group {
        ensure_group_exists(store, group_id).await?;
    }

    let changes = PostChanges {
        text: req.text.flatten(),
        image: req.image,
        group_id: req.group,
    };

    let updated = store
        .update_post(post_id, &changes)
        .await
        .map_err(|e| match e {
            RepoError::MissingReference => changes
                .group_id
                .flatten()
                .map_or(AppError::Internal, unknown_group),
            other => other.into(),
        })?;

    // 所有者チェック後に別リクエストで削除された場合
    updated.ok_or_else(|| AppError::not_found("post"))
}

pub async fn delete(store: &dyn Store, actor: &AuthCtx, post_id: i64) -> Result<(), AppError> {
    let existing = retrieve(store, post_id).await?;
    ensure_owner(actor, &existing)?;

    if !store.delete_post(post_id).await? {
        return Err(AppError::not_found("post"));
    }
    debug!(post_id, "post deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::MemoryRepo;
    use crate::repos::UserRepo;

    fn text(t: &str) -> PostRequest {
        PostRequest {
            text: Some(Some(t.into())),
            ..Default::default()
        }
    }

    async fn actor(store: &MemoryRepo, name: &str) -> AuthCtx {
        AuthCtx::new(store.create_user(name, "unused").await.unwrap().id)
    }

    #[tokio::test]
    async fn create_takes_author_from_actor() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;

        let post = create(&store, &leo, text("hi")).await.unwrap();

        assert_eq!(post.author_id, leo.user_id);
        assert_eq!(post.author_username, "leo");
        assert_eq!(post.group_id, None);
    }

    #[tokio::test]
    async fn create_rejects_blank_text_and_unknown_group() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;

        assert!(matches!(
            create(&store, &leo, text("  ")).await,
            Err(AppError::Validation { field: Some("text"), .. })
        ));

        let with_group = PostRequest {
            group: Some(Some(999)),
            ..text("hi")
        };
        assert!(matches!(
            create(&store, &leo, with_group).await,
            Err(AppError::Validation { field: Some("group"), .. })
        ));
    }

    #[tokio::test]
    async fn stranger_cannot_update_or_delete() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;
        let mia = actor(&store, "mia").await;
        let post = create(&store, &leo, text("original")).await.unwrap();

        assert!(matches!(
            update(&store, &mia, post.id, text("hijack"), false).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            delete(&store, &mia, post.id).await,
            Err(AppError::Forbidden)
        ));
        assert_eq!(retrieve(&store, post.id).await.unwrap().text, "original");
    }

    #[tokio::test]
    async fn ownership_is_checked_before_validation() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;
        let mia = actor(&store, "mia").await;
        let post = create(&store, &leo, text("original")).await.unwrap();

        // invalid body from a non-owner is still a 403
        assert!(matches!(
            update(&store, &mia, post.id, PostRequest::default(), false).await,
            Err(AppError::Forbidden)
        ));
        assert!(matches!(
            update(&store, &leo, 404, text("x"), true).await,
            Err(AppError::NotFound { resource: "post" })
        ));
    }

    #[tokio::test]
    async fn put_requires_text_patch_is_partial() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;
        let group = store.insert_group("Cats", "cats", "");
        let post = create(&store, &leo, text("original")).await.unwrap();

        assert!(matches!(
            update(&store, &leo, post.id, PostRequest::default(), false).await,
            Err(AppError::Validation { field: Some("text"), .. })
        ));

        let set_group = PostRequest {
            group: Some(Some(group.id)),
            ..Default::default()
        };
        let patched = update(&store, &leo, post.id, set_group, true).await.unwrap();
        assert_eq!(patched.text, "original");
        assert_eq!(patched.group_id, Some(group.id));

        let clear_group = PostRequest {
            group: Some(None),
            ..Default::default()
        };
        let cleared = update(&store, &leo, post.id, clear_group, true).await.unwrap();
        assert_eq!(cleared.group_id, None);
    }

    #[tokio::test]
    async fn paging_reports_total_count() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;
        for i in 0..5 {
            create(&store, &leo, text(&format!("post {i}"))).await.unwrap();
        }

        let (count, rows) = list_page(&store, Page { limit: 2, offset: 4 }).await.unwrap();
        assert_eq!(count, 5);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].text, "post 4");
        assert_eq!(list(&store).await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn author_deletes_own_post() {
        let store = MemoryRepo::new();
        let leo = actor(&store, "leo").await;
        let post = create(&store, &leo, text("bye")).await.unwrap();

        delete(&store, &leo, post.id).await.unwrap();
        assert!(matches!(
            retrieve(&store, post.id).await,
            Err(AppError::NotFound { .. })
        ));
    }
}
