use anyhow::{bail, Context, Result};
use std::env;
use std::path::PathBuf;

/// Which persistence backend serves the news posts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Spanner,
    Memory,
}

/// Connection settings for the Spanner backend
#[derive(Debug, Clone, PartialEq)]
pub struct SpannerConfig {
    pub emulator_host: Option<String>,
    pub project: String,
    pub instance: String,
    pub database: String,
}

impl SpannerConfig {
    pub fn database_path(&self) -> String {
        format!(
            "projects/{}/instances/{}/databases/{}",
            self.project, self.instance, self.database
        )
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub spanner: Option<SpannerConfig>,
    pub service_port: u16,
    pub service_host: String,
    pub public_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let store_backend = match lookup("POST_STORE").as_deref() {
            None | Some("spanner") => StoreBackend::Spanner,
            Some("memory") => StoreBackend::Memory,
            Some(other) => bail!("POST_STORE must be one of: spanner, memory, got '{}'", other),
        };

        let spanner = match store_backend {
            StoreBackend::Spanner => Some(SpannerConfig {
                emulator_host: lookup("SPANNER_EMULATOR_HOST"),
                project: lookup("SPANNER_PROJECT")
                    .context("SPANNER_PROJECT environment variable is required")?,
                instance: lookup("SPANNER_INSTANCE")
                    .context("SPANNER_INSTANCE environment variable is required")?,
                database: lookup("SPANNER_DATABASE")
                    .context("SPANNER_DATABASE environment variable is required")?,
            }),
            StoreBackend::Memory => None,
        };

        let service_port = lookup("SERVICE_PORT")
            .unwrap_or_else(|| "5000".to_string())
            .parse::<u16>()
            .context("SERVICE_PORT must be a valid port number (0-65535)")?;

        let service_host = lookup("SERVICE_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let public_dir = lookup("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        Ok(Config {
            store_backend,
            spanner,
            service_port,
            service_host,
            public_dir,
        })
    }

    /// Configuration for an in-memory portal, used by tests
    #[cfg(test)]
    pub fn for_memory_store() -> Self {
        Config {
            store_backend: StoreBackend::Memory,
            spanner: None,
            service_port: 5000,
            service_host: "127.0.0.1".to_string(),
            public_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/public")),
        }
    }

    pub fn log_startup(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Post store: {:?}", self.store_backend);
        if let Some(spanner) = &self.spanner {
            tracing::info!(
                "  Spanner emulator: {}",
                spanner
                    .emulator_host
                    .as_deref()
                    .unwrap_or("disabled (using production)")
            );
            tracing::info!("  Spanner project: {}", spanner.project);
            tracing::info!("  Spanner instance: {}", spanner.instance);
            tracing::info!("  Spanner database: {}", spanner.database);
        }
        tracing::info!("  Static assets: {}", self.public_dir.display());
        tracing::info!("  Service listening on: {}:{}", self.service_host, self.service_port);
    }
}
