use utoipa::OpenApi;

use crate::error::{ErrorResponse, HealthResponse, UnhealthyResponse};
use crate::handlers;
use crate::models::{MessageResponse, NewsListResponse, NewsPostInput, NewsPostResponse};

/// OpenAPI documentation for the JSON side of the portal
#[derive(OpenApi)]
#[openapi(
    info(
        title = "community-portal API",
        version = "1.0.0",
        description = "News posts for the local community portal"
    ),
    paths(
        handlers::health::health_handler,
        handlers::list::list_handler,
        handlers::get::get_handler,
        handlers::create::create_handler,
        handlers::update::update_handler,
        handlers::delete::delete_handler
    ),
    components(
        schemas(
            NewsPostInput,
            NewsPostResponse,
            NewsListResponse,
            MessageResponse,
            ErrorResponse,
            HealthResponse,
            UnhealthyResponse
        )
    ),
    tags(
        (name = "health", description = "Health check operations"),
        (name = "news", description = "News post operations")
    )
)]
pub struct ApiDoc;
