pub mod create;
pub mod delete;
pub mod get;
pub mod health;
pub mod list;
pub mod pages;
pub mod update;

#[cfg(test)]
pub(crate) mod test_support;

pub use create::{create_handler, create_post_handler};
pub use delete::delete_handler;
pub use get::{edit_form_handler, get_handler};
pub use health::health_handler;
pub use list::{list_handler, news_page_handler};
pub use pages::{contact_handler, create_form_handler, faq_handler, home_handler};
pub use update::{update_handler, update_post_handler};

use crate::error::ApiError;
use uuid::Uuid;

/// Parse a post id from the path; a malformed id cannot name a post
fn parse_post_id(id_str: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id_str).map_err(|_| {
        tracing::info!("Rejecting malformed post id: {}", id_str);
        ApiError::PostNotFound
    })
}
