use crate::error::{ApiError, ErrorResponse, Operation};
use crate::handlers::pages::render;
use crate::models::{NewsListResponse, NewsPostResponse};
use crate::routes;
use crate::state::AppState;
use crate::views::{Page, PageData};
use axum::{extract::State, http::StatusCode, response::Html, Json};

/// GET /news handler - News page listing every post
pub async fn news_page_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let posts = state
        .posts
        .list()
        .await
        .map_err(ApiError::during(Operation::ListPosts))?;

    tracing::info!("Rendering news page with {} posts", posts.len());
    let posts = posts.into_iter().map(NewsPostResponse::from).collect();
    render(&state, Page::News, PageData::Posts(posts))
}

/// GET /api/news handler - List all posts as JSON, oldest first
#[utoipa::path(
    get,
    path = routes::API_NEWS,
    responses(
        (status = 200, description = "All news posts", body = NewsListResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "news"
)]
pub async fn list_handler(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<NewsListResponse>), ApiError> {
    let posts = state
        .posts
        .list()
        .await
        .map_err(ApiError::during(Operation::ListPosts))?;

    let data: Vec<NewsPostResponse> = posts.into_iter().map(NewsPostResponse::from).collect();
    let response = NewsListResponse {
        total_count: data.len(),
        data,
    };

    tracing::info!("Listed {} posts", response.total_count);
    Ok((StatusCode::OK, Json(response)))
}
