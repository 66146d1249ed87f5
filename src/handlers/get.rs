use crate::error::{ApiError, ErrorResponse, Operation};
use crate::handlers::pages::render;
use crate::handlers::parse_post_id;
use crate::models::{NewsPost, NewsPostResponse};
use crate::routes;
use crate::state::AppState;
use crate::views::{Page, PageData};
use axum::{extract::Path, extract::State, http::StatusCode, response::Html, Json};

async fn find_post(state: &AppState, id_str: &str) -> Result<NewsPost, ApiError> {
    let id = parse_post_id(id_str)?;

    match state
        .posts
        .find(id)
        .await
        .map_err(ApiError::during(Operation::FetchPost))?
    {
        Some(post) => Ok(post),
        None => {
            tracing::info!("Post not found with id: {}", id);
            Err(ApiError::PostNotFound)
        }
    }
}

/// GET /news/edit/:id handler - Edit form pre-filled with the stored post
pub async fn edit_form_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Html<String>, ApiError> {
    let post = find_post(&state, &id_str).await?;
    render(&state, Page::EditPost, PageData::Post(post.into()))
}

/// GET /api/news/:id handler - Retrieve one post
#[utoipa::path(
    get,
    path = routes::API_NEWS_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the news post")
    ),
    responses(
        (status = 200, description = "Post found", body = NewsPostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "news"
)]
pub async fn get_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<NewsPostResponse>), ApiError> {
    let post = find_post(&state, &id_str).await?;

    tracing::info!("Successfully retrieved post with id: {}", post.id);
    Ok((StatusCode::OK, Json(post.into())))
}
