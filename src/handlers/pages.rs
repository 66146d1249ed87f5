use crate::error::ApiError;
use crate::state::AppState;
use crate::views::{Page, PageData};
use axum::{extract::State, response::Html};

/// Render a page template into an HTML response
pub(crate) fn render(
    state: &AppState,
    page: Page,
    data: PageData,
) -> Result<Html<String>, ApiError> {
    Ok(Html(state.views.render(page, data)?))
}

/// GET / handler - Home page
pub async fn home_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, Page::Home, PageData::None)
}

/// GET /contact handler
pub async fn contact_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, Page::Contact, PageData::None)
}

/// GET /faq handler
pub async fn faq_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    render(&state, Page::Faq, PageData::None)
}

/// GET /news/create handler - Empty form for a new post
pub async fn create_form_handler(
    State(state): State<AppState>,
) -> Result<Html<String>, ApiError> {
    render(&state, Page::CreatePost, PageData::None)
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{body_text, get, memory_app, send};
    use axum::http::{header::CONTENT_TYPE, StatusCode};

    #[tokio::test]
    async fn test_static_pages() {
        let (app, _) = memory_app();

        for (uri, title) in [
            ("/", "Welcome to Local Community Portal"),
            ("/contact", "Contact Us"),
            ("/faq", "Frequently Asked Questions"),
            ("/news/create", "Create New Post"),
        ] {
            let response = send(&app, get(uri)).await;

            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
            let content_type = response.headers()[CONTENT_TYPE].to_str().unwrap().to_string();
            assert!(content_type.starts_with("text/html"), "{}", uri);
            assert!(body_text(response).await.contains(title), "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_create_form_posts_to_news() {
        let (app, _) = memory_app();

        let html = body_text(send(&app, get("/news/create")).await).await;

        assert!(html.contains("action=\"/news\" method=\"POST\""));
        assert!(html.contains("name=\"title\""));
        assert!(html.contains("name=\"content\""));
    }

    #[tokio::test]
    async fn test_static_assets_are_served() {
        let (app, _) = memory_app();

        let response = send(&app, get("/js/delete.js")).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("button-delete"));

        let response = send(&app, get("/no/such/file.txt")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
