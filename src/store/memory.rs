//! In-memory post store, for local development and tests.
//!
//! Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{PostChanges, PostStore, StoreError};
use crate::models::NewsPost;

/// Posts kept in insertion order behind an async RwLock
#[derive(Default)]
pub struct MemoryPostStore {
    posts: RwLock<Vec<NewsPost>>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn list(&self) -> Result<Vec<NewsPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.clone())
    }

    async fn find(&self, id: Uuid) -> Result<Option<NewsPost>, StoreError> {
        let posts = self.posts.read().await;
        Ok(posts.iter().find(|post| post.id == id).cloned())
    }

    async fn insert(&self, post: &NewsPost) -> Result<(), StoreError> {
        let mut posts = self.posts.write().await;
        if posts.iter().any(|existing| existing.id == post.id) {
            return Err(anyhow::anyhow!("Post already exists: {}", post.id).into());
        }
        posts.push(post.clone());
        tracing::debug!("Inserted post with id: {}", post.id);
        Ok(())
    }

    async fn apply_changes(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<NewsPost>, StoreError> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|post| post.id == id) else {
            return Ok(None);
        };
        changes.apply_to(post);
        tracing::debug!("Updated post with id: {}", id);
        Ok(Some(post.clone()))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<NewsPost>, StoreError> {
        let mut posts = self.posts.write().await;
        let removed = posts
            .iter()
            .position(|post| post.id == id)
            .map(|index| posts.remove(index));
        if removed.is_some() {
            tracing::debug!("Deleted post with id: {}", id);
        }
        Ok(removed)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewsPostInput;

    fn input(title: &str, content: &str) -> NewsPostInput {
        NewsPostInput {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryPostStore::new();

        let created = store.create(input("Library hours", "Open late on Fridays")).await.unwrap();
        let found = store.find(created.id).await.unwrap();

        assert_eq!(found, Some(created));
    }

    #[tokio::test]
    async fn test_create_with_empty_title_stores_nothing() {
        let store = MemoryPostStore::new();

        let result = store.create(input("", "content")).await;

        assert!(matches!(result, Err(StoreError::Validation(_))));
        assert!(store.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let store = MemoryPostStore::new();
        assert_eq!(store.find(Uuid::new_v4()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_returns_posts_in_insertion_order() {
        let store = MemoryPostStore::new();
        let mut ids = Vec::new();
        for n in 0..5 {
            let post = store
                .create(input(&format!("Post {}", n), "body"))
                .await
                .unwrap();
            ids.push(post.id);
        }

        let listed: Vec<Uuid> = store.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(listed, ids);
    }

    #[tokio::test]
    async fn test_update_changes_only_title_and_content() {
        let store = MemoryPostStore::new();
        let created = store.create(input("Old title", "Old content")).await.unwrap();

        let updated = store
            .update(created.id, input(" New title ", "New content"))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.created_at, created.created_at);
        assert_eq!(updated.title, "New title");
        assert_eq!(updated.content, "New content");
        assert_eq!(store.find(created.id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_field() {
        let store = MemoryPostStore::new();
        let created = store.create(input("Title", "Content")).await.unwrap();

        let updated = store
            .update(
                created.id,
                NewsPostInput {
                    title: None,
                    content: Some("Revised".to_string()),
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Title");
        assert_eq!(updated.content, "Revised");
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let store = MemoryPostStore::new();
        let result = store.update(Uuid::new_v4(), input("T", "C")).await.unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_remove_then_find_returns_none() {
        let store = MemoryPostStore::new();
        let created = store.create(input("Title", "Content")).await.unwrap();

        let removed = store.remove(created.id).await.unwrap();
        assert_eq!(removed, Some(created.clone()));
        assert_eq!(store.find(created.id).await.unwrap(), None);
        assert_eq!(store.remove(created.id).await.unwrap(), None);
    }
}
