use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted news post
#[derive(Debug, Clone, PartialEq)]
pub struct NewsPost {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Fields submitted by the create and edit forms, or by API clients
///
/// Both fields are optional here so that a missing field reaches the
/// store's validation instead of failing body extraction.
#[derive(Debug, Clone, Default, Deserialize, utoipa::ToSchema)]
pub struct NewsPostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// JSON representation of a news post
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsPostResponse {
    pub id: String,
    pub title: String,
    pub content: String,
    pub created_at: String,
}

impl From<NewsPost> for NewsPostResponse {
    fn from(post: NewsPost) -> Self {
        NewsPostResponse {
            id: post.id.to_string(),
            title: post.title,
            content: post.content,
            created_at: post.created_at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Response type for the JSON list endpoint
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewsListResponse {
    pub data: Vec<NewsPostResponse>,
    pub total_count: usize,
}

/// Plain acknowledgement, e.g. after a delete
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
