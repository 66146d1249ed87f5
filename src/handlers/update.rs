use crate::error::{ApiError, ErrorResponse, Operation};
use crate::extract::PostPayload;
use crate::handlers::parse_post_id;
use crate::models::{NewsPost, NewsPostInput, NewsPostResponse};
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, response::Redirect, Json};

async fn update_post(
    state: &AppState,
    id_str: &str,
    input: NewsPostInput,
) -> Result<NewsPost, ApiError> {
    let id = parse_post_id(id_str)?;

    match state
        .posts
        .update(id, input)
        .await
        .map_err(ApiError::during(Operation::UpdatePost))?
    {
        Some(post) => {
            tracing::info!("Updated post with id: {}", id);
            Ok(post)
        }
        None => {
            tracing::info!("Post not found with id: {}", id);
            Err(ApiError::PostNotFound)
        }
    }
}

/// PUT /news/:id handler - Save the edit form, then show the list
///
/// Browsers reach this through `POST /news/:id?_method=PUT`.
pub async fn update_post_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    PostPayload(input): PostPayload,
) -> Result<Redirect, ApiError> {
    update_post(&state, &id_str, input).await?;
    Ok(Redirect::to(routes::NEWS))
}

/// PUT /api/news/:id handler - Replace title and/or content of a post
#[utoipa::path(
    put,
    path = routes::API_NEWS_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the news post")
    ),
    request_body = NewsPostInput,
    responses(
        (status = 200, description = "Post updated", body = NewsPostResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Validation or database error", body = ErrorResponse)
    ),
    tag = "news"
)]
pub async fn update_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
    PostPayload(input): PostPayload,
) -> Result<(StatusCode, Json<NewsPostResponse>), ApiError> {
    let post = update_post(&state, &id_str, input).await?;
    Ok((StatusCode::OK, Json(post.into())))
}
