use crate::error::{ApiError, ErrorResponse, Operation};
use crate::extract::PostPayload;
use crate::models::{NewsPostInput, NewsPostResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, response::Redirect, Json};

/// POST /news handler - Create a post from the HTML form, then show the list
pub async fn create_post_handler(
    State(state): State<AppState>,
    PostPayload(input): PostPayload,
) -> Result<Redirect, ApiError> {
    let post = state
        .posts
        .create(input)
        .await
        .map_err(ApiError::during(Operation::CreatePost))?;

    tracing::info!("Created post with id: {}", post.id);
    Ok(Redirect::to(routes::NEWS))
}

/// POST /api/news handler - Create a post and return it
#[utoipa::path(
    post,
    path = routes::API_NEWS,
    request_body = NewsPostInput,
    responses(
        (status = 201, description = "Post created", body = NewsPostResponse),
        (status = 500, description = "Validation or database error", body = ErrorResponse)
    ),
    tag = "news"
)]
pub async fn create_handler(
    State(state): State<AppState>,
    PostPayload(input): PostPayload,
) -> Result<(StatusCode, Json<NewsPostResponse>), ApiError> {
    let post = state
        .posts
        .create(input)
        .await
        .map_err(ApiError::during(Operation::CreatePost))?;

    tracing::info!("Created post with id: {}", post.id);
    Ok((StatusCode::CREATED, Json(post.into())))
}
