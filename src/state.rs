use crate::config::Config;
use crate::store::PostStore;
use crate::views::Views;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostStore>,
    pub views: Arc<Views>,
    pub config: Arc<Config>,
}
