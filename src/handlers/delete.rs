use crate::error::{ApiError, ErrorResponse, Operation};
use crate::handlers::parse_post_id;
use crate::models::MessageResponse;
use crate::routes;
use crate::state::AppState;
use axum::{extract::Path, extract::State, http::StatusCode, Json};

/// DELETE /news/:id handler - Remove a post
///
/// Called asynchronously by the delete button script, so it answers with
/// JSON rather than a redirect. Also mounted at `/api/news/:id`.
#[utoipa::path(
    delete,
    path = routes::NEWS_ITEM,
    params(
        ("id" = String, Path, description = "UUID of the news post")
    ),
    responses(
        (status = 200, description = "Post deleted", body = MessageResponse),
        (status = 404, description = "Post not found", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "news"
)]
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    let id = parse_post_id(&id_str)?;

    let removed = state
        .posts
        .remove(id)
        .await
        .map_err(ApiError::during(Operation::DeletePost))?;

    if removed.is_none() {
        tracing::info!("Post not found with id: {}", id);
        return Err(ApiError::PostNotFound);
    }

    tracing::info!("Deleted post with id: {}", id);
    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: "News post deleted successfully".to_string(),
        }),
    ))
}
