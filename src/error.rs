use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::store::StoreError;

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response type for health check endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Response type for unhealthy status
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct UnhealthyResponse {
    pub status: String,
    pub error: String,
}

/// What a request was doing when it failed; becomes the `message` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    ListPosts,
    FetchPost,
    CreatePost,
    UpdatePost,
    DeletePost,
}

impl Operation {
    pub fn failure_message(self) -> &'static str {
        match self {
            Operation::ListPosts => "Error fetching news posts",
            Operation::FetchPost => "Error fetching news post",
            Operation::CreatePost => "Error creating news post",
            Operation::UpdatePost => "Error updating news post",
            Operation::DeletePost => "Error deleting news post",
        }
    }
}

/// Error type for all portal endpoints
///
/// Missing posts become 404s. Every other failure, validation included, is
/// reported as a 500 carrying the operation message and the underlying cause.
#[derive(Debug)]
pub enum ApiError {
    /// No post with the requested id
    PostNotFound,
    /// A store operation failed
    Store(Operation, StoreError),
    /// A page template failed to render
    Render(tera::Error),
}

impl ApiError {
    /// Adapter for `map_err` that tags a store error with its operation
    pub fn during(operation: Operation) -> impl FnOnce(StoreError) -> ApiError {
        move |err| ApiError::Store(operation, err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message, error) = match self {
            ApiError::PostNotFound => (StatusCode::NOT_FOUND, "News post not found", None),
            ApiError::Store(operation, err) => {
                tracing::error!("{}: {}", operation.failure_message(), err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    operation.failure_message(),
                    Some(err.to_string()),
                )
            }
            ApiError::Render(err) => {
                tracing::error!("Failed to render page: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Error rendering page",
                    Some(err.to_string()),
                )
            }
        };

        let body = Json(ErrorResponse {
            message: message.to_string(),
            error,
        });

        (status, body).into_response()
    }
}

impl From<tera::Error> for ApiError {
    fn from(err: tera::Error) -> Self {
        ApiError::Render(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_of(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_has_no_error_field() {
        let (status, body) = body_of(ApiError::PostNotFound).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "News post not found");
        assert!(body.error.is_none());
    }

    #[tokio::test]
    async fn test_validation_failure_passes_message_through() {
        let err = StoreError::Validation("title is required".to_string());
        let (status, body) = body_of(ApiError::during(Operation::CreatePost)(err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Error creating news post");
        assert_eq!(body.error.as_deref(), Some("Validation failed: title is required"));
    }

    #[tokio::test]
    async fn test_backend_failure_keeps_context() {
        let err = StoreError::Backend(anyhow::anyhow!("Failed to delete news post from Spanner"));
        let (status, body) = body_of(ApiError::Store(Operation::DeletePost, err)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.message, "Error deleting news post");
        assert!(body.error.unwrap().contains("Spanner"));
    }
}
