//! Helpers for driving the full router in handler tests.

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{self, header::CONTENT_TYPE, Method},
    response::Response,
};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

use crate::config::Config;
use crate::models::{NewsPost, NewsPostInput};
use crate::routes::{self, PortalService};
use crate::state::AppState;
use crate::store::{MemoryPostStore, PostChanges, PostStore, StoreError};
use crate::views::Views;

fn app_with(posts: Arc<dyn PostStore>) -> PortalService {
    let state = AppState {
        posts,
        views: Arc::new(Views::new().expect("templates should compile")),
        config: Arc::new(Config::for_memory_store()),
    };
    routes::app(state)
}

/// The full app over an empty in-memory store, plus a handle to that store
pub fn memory_app() -> (PortalService, Arc<MemoryPostStore>) {
    let store = Arc::new(MemoryPostStore::new());
    (app_with(store.clone()), store)
}

/// The full app over a store whose every operation fails
pub fn failing_app() -> PortalService {
    app_with(Arc::new(FailingPostStore))
}

pub async fn seed(store: &MemoryPostStore, title: &str, content: &str) -> NewsPost {
    store
        .create(NewsPostInput {
            title: Some(title.to_string()),
            content: Some(content.to_string()),
        })
        .await
        .expect("seed post should be valid")
}

pub async fn send(app: &PortalService, request: http::Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

pub fn get(uri: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn form_request(method: Method, uri: &str, body: &str) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: serde_json::Value) -> http::Request<Body> {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_text(response: Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json<T: DeserializeOwned>(response: Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

struct FailingPostStore;

fn unavailable() -> StoreError {
    StoreError::Backend(anyhow::anyhow!("store unavailable"))
}

#[async_trait]
impl PostStore for FailingPostStore {
    async fn list(&self) -> Result<Vec<NewsPost>, StoreError> {
        Err(unavailable())
    }

    async fn find(&self, _id: Uuid) -> Result<Option<NewsPost>, StoreError> {
        Err(unavailable())
    }

    async fn insert(&self, _post: &NewsPost) -> Result<(), StoreError> {
        Err(unavailable())
    }

    async fn apply_changes(
        &self,
        _id: Uuid,
        _changes: &PostChanges,
    ) -> Result<Option<NewsPost>, StoreError> {
        Err(unavailable())
    }

    async fn remove(&self, _id: Uuid) -> Result<Option<NewsPost>, StoreError> {
        Err(unavailable())
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Err(unavailable())
    }
}
