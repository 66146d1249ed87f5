//! Persistence of news posts.
//!
//! The store owns the post schema: required fields, title trimming and
//! creation timestamps are applied here, whichever backend holds the data.

pub mod memory;
pub mod spanner;

use async_trait::async_trait;
use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::models::{NewsPost, NewsPostInput};

pub use memory::MemoryPostStore;
pub use spanner::SpannerPostStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Validated replacement values for an update; `None` keeps the stored value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none()
    }

    /// Apply the changes to a post, leaving id and creation time alone
    pub fn apply_to(&self, post: &mut NewsPost) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
    }
}

fn checked_title(title: String) -> Result<String, StoreError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(StoreError::Validation("title is required".to_string()));
    }
    Ok(title.to_string())
}

fn checked_content(content: String) -> Result<String, StoreError> {
    if content.is_empty() {
        return Err(StoreError::Validation("content is required".to_string()));
    }
    Ok(content)
}

/// Validate a create request and build the post it describes
pub fn new_post(input: NewsPostInput) -> Result<NewsPost, StoreError> {
    let title = checked_title(input.title.unwrap_or_default())?;
    let content = checked_content(input.content.unwrap_or_default())?;

    Ok(NewsPost {
        id: Uuid::new_v4(),
        title,
        content,
        created_at: Utc::now(),
    })
}

/// Validate an update request; only the fields present are checked
pub fn post_changes(input: NewsPostInput) -> Result<PostChanges, StoreError> {
    Ok(PostChanges {
        title: input.title.map(checked_title).transpose()?,
        content: input.content.map(checked_content).transpose()?,
    })
}

/// Storage backend for news posts
#[async_trait]
pub trait PostStore: Send + Sync {
    /// All posts in store order (oldest first)
    async fn list(&self) -> Result<Vec<NewsPost>, StoreError>;

    async fn find(&self, id: Uuid) -> Result<Option<NewsPost>, StoreError>;

    /// Persist an already validated post
    async fn insert(&self, post: &NewsPost) -> Result<(), StoreError>;

    /// Replace title and/or content; `None` when no post has this id
    async fn apply_changes(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<NewsPost>, StoreError>;

    /// Delete a post, returning it; `None` when no post has this id
    async fn remove(&self, id: Uuid) -> Result<Option<NewsPost>, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    async fn create(&self, input: NewsPostInput) -> Result<NewsPost, StoreError> {
        let post = new_post(input)?;
        self.insert(&post).await?;
        Ok(post)
    }

    async fn update(
        &self,
        id: Uuid,
        input: NewsPostInput,
    ) -> Result<Option<NewsPost>, StoreError> {
        let changes = post_changes(input)?;
        if changes.is_empty() {
            return self.find(id).await;
        }
        self.apply_changes(id, &changes).await
    }
}
