//! Groups are read-only through the API.
use crate::error::AppError;
use crate::repos::group_repo::GroupRow;
use crate::repos::Store;

pub async fn list(store: &dyn Store) -> Result<Vec<GroupRow>, AppError> {
    Ok(store.list_groups().await?)
}

pub async fn retrieve(store: &dyn Store, group_id: i64) -> Result<GroupRow, AppError> {
    store
        .get_group(group_id)
        .await?
        .ok_or_else(|| AppError::not_found("group"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::memory::MemoryRepo;

    #[tokio::test]
    async fn lists_and_retrieves_seeded_groups() {
        let store = MemoryRepo::new();
        let cats = store.insert_group("Cats", "cats", "all about cats");
        store.insert_group("Dogs", "dogs", "");

        assert_eq!(list(&store).await.unwrap().len(), 2);
        assert_eq!(retrieve(&store, cats.id).await.unwrap().slug, "cats");
        assert!(matches!(
            retrieve(&store, 12345).await,
            Err(AppError::NotFound { resource: "group" })
        ));
    }
}
