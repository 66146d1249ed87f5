use axum::{
    extract::Request,
    routing::{get, put},
    Router,
};
use tower::util::{MapRequest, MapRequestLayer};
use tower::Layer;
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api_doc::ApiDoc;
use crate::handlers;
use crate::method_override::override_method;
use crate::state::AppState;

// Route path constants - single source of truth for all paths

pub const HOME: &str = "/";
pub const CONTACT: &str = "/contact";
pub const FAQ: &str = "/faq";
pub const NEWS: &str = "/news";
pub const NEWS_CREATE: &str = "/news/create";
pub const NEWS_EDIT: &str = "/news/edit/{id}";
pub const NEWS_ITEM: &str = "/news/{id}";
pub const API_NEWS: &str = "/api/news";
pub const API_NEWS_ITEM: &str = "/api/news/{id}";
pub const HEALTH: &str = "/health";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
pub const SWAGGER_UI: &str = "/swagger-ui";

/// The router wrapped in method override, ready to serve
pub type PortalService = MapRequest<Router, fn(Request) -> Request>;

/// All portal routes; unmatched paths fall back to the public directory
pub fn router(state: AppState) -> Router {
    let public_dir = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route(HOME, get(handlers::home_handler))
        .route(CONTACT, get(handlers::contact_handler))
        .route(FAQ, get(handlers::faq_handler))
        .route(
            NEWS,
            get(handlers::news_page_handler).post(handlers::create_post_handler),
        )
        .route(NEWS_CREATE, get(handlers::create_form_handler))
        .route(NEWS_EDIT, get(handlers::edit_form_handler))
        .route(
            NEWS_ITEM,
            put(handlers::update_post_handler).delete(handlers::delete_handler),
        )
        .route(
            API_NEWS,
            get(handlers::list_handler).post(handlers::create_handler),
        )
        .route(
            API_NEWS_ITEM,
            get(handlers::get_handler)
                .put(handlers::update_handler)
                .delete(handlers::delete_handler),
        )
        .route(HEALTH, get(handlers::health_handler))
        .merge(SwaggerUi::new(SWAGGER_UI).url(OPENAPI_JSON, ApiDoc::openapi()))
        .fallback_service(public_dir)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Wrap the router so overridden POSTs are routed by their real verb
pub fn app(state: AppState) -> PortalService {
    let rewrite: fn(Request) -> Request = override_method;
    MapRequestLayer::new(rewrite).layer(router(state))
}
