use crate::error::{HealthResponse, UnhealthyResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};

/// GET /health handler - Health check endpoint
///
/// Probes the post store. Returns 200 OK if it answers,
/// 503 Service Unavailable otherwise.
#[utoipa::path(
    get,
    path = routes::HEALTH,
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Service is unhealthy", body = UnhealthyResponse)
    ),
    tag = "health"
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<HealthResponse>), (StatusCode, Json<UnhealthyResponse>)> {
    match state.posts.health_check().await {
        Ok(_) => {
            tracing::debug!("Health check passed");
            Ok((
                StatusCode::OK,
                Json(HealthResponse {
                    status: "healthy".to_string(),
                }),
            ))
        }
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            Err((
                StatusCode::SERVICE_UNAVAILABLE,
                Json(UnhealthyResponse {
                    status: "unhealthy".to_string(),
                    error: format!("Cannot connect to database: {}", e),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{HealthResponse, UnhealthyResponse};
    use crate::handlers::test_support::{body_json, failing_app, get, memory_app, send};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health_endpoint_healthy() {
        let (app, _) = memory_app();

        let response = send(&app, get("/health")).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body: HealthResponse = body_json(response).await;
        assert_eq!(body.status, "healthy");
    }

    #[tokio::test]
    async fn test_health_endpoint_unhealthy() {
        let app = failing_app();

        let response = send(&app, get("/health")).await;

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        let body: UnhealthyResponse = body_json(response).await;
        assert_eq!(body.status, "unhealthy");
        assert!(body.error.contains("store unavailable"));
    }

    #[tokio::test]
    async fn test_openapi_document_is_served() {
        let (app, _) = memory_app();

        let response = send(&app, get("/api-docs/openapi.json")).await;
        assert_eq!(response.status(), StatusCode::OK);

        let doc: serde_json::Value = body_json(response).await;
        assert!(doc["paths"]["/api/news"].is_object());
        assert!(doc["paths"]["/news/{id}"]["delete"].is_object());
    }
}
