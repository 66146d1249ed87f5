mod api_doc;
mod config;
mod error;
mod extract;
mod handlers;
mod method_override;
mod models;
mod routes;
mod state;
mod store;
mod views;

use anyhow::Context;
use axum::{extract::Request, ServiceExt};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, StoreBackend};
use state::AppState;
use store::{MemoryPostStore, PostStore, SpannerPostStore};
use views::Views;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "community_portal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("community-portal starting");

    let config = Config::from_env()?;
    config.log_startup();

    let posts: Arc<dyn PostStore> = match (config.store_backend, &config.spanner) {
        (StoreBackend::Spanner, Some(spanner)) => {
            Arc::new(SpannerPostStore::connect(spanner).await?)
        }
        (StoreBackend::Spanner, None) => {
            anyhow::bail!("Spanner backend selected without Spanner settings")
        }
        (StoreBackend::Memory, _) => {
            tracing::warn!("Using in-memory post store; posts are lost on restart");
            Arc::new(MemoryPostStore::new())
        }
    };

    let views = Views::new().context("Failed to load page templates")?;

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let state = AppState {
        posts,
        views: Arc::new(views),
        config: Arc::new(config),
    };
    let app = routes::app(state);

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .await
        .context("Server error")?;

    Ok(())
}
