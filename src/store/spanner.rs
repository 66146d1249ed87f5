use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use gcloud_gax::grpc::{Code, Status};
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::key::Key;
use gcloud_spanner::mutation::{delete, insert, update};
use gcloud_spanner::row::Row;
use gcloud_spanner::statement::Statement;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

use super::{PostChanges, PostStore, StoreError};
use crate::config::SpannerConfig;
use crate::models::NewsPost;

const TABLE: &str = "news_posts";

const CREATE_TABLE_DDL: &str = r#"
CREATE TABLE news_posts (
    id STRING(36) NOT NULL,
    title STRING(MAX) NOT NULL,
    content STRING(MAX) NOT NULL,
    created_at TIMESTAMP NOT NULL,
) PRIMARY KEY (id)
"#;

/// Post store backed by a Cloud Spanner table
#[derive(Clone)]
pub struct SpannerPostStore {
    inner: Arc<Client>,
}

impl SpannerPostStore {
    /// Connect to Spanner, provisioning instance, database and table first
    ///
    /// The gcloud-spanner library picks up the SPANNER_EMULATOR_HOST
    /// environment variable and connects to the emulator when it is set.
    pub async fn connect(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    async fn query_posts(&self, statement: Statement) -> Result<Vec<NewsPost>> {
        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query news posts from Spanner")?;

        let mut posts = Vec::new();
        while let Some(row) = result_set.next().await? {
            posts.push(post_from_row(&row)?);
        }
        Ok(posts)
    }

    async fn read(&self, id: Uuid) -> Result<Option<NewsPost>> {
        let mut statement = Statement::new(
            "SELECT id, title, content, created_at FROM news_posts WHERE id = @id",
        );
        statement.add_param("id", &id.to_string());

        let post = self.query_posts(statement).await?.into_iter().next();
        match &post {
            Some(_) => tracing::debug!("Read post with id: {}", id),
            None => tracing::debug!("Post not found with id: {}", id),
        }
        Ok(post)
    }
}

fn post_from_row(row: &Row) -> Result<NewsPost> {
    let id_str: String = row.column_by_name("id")?;
    let title: String = row.column_by_name("title")?;
    let content: String = row.column_by_name("content")?;
    // TIMESTAMP columns come back in their RFC 3339 string encoding
    let created_at_str: String = row.column_by_name("created_at")?;

    let id = Uuid::parse_str(&id_str)
        .with_context(|| format!("Stored post id is not a UUID: {}", id_str))?;
    let created_at = DateTime::parse_from_rfc3339(&created_at_str)
        .context("Failed to parse created_at timestamp")?
        .with_timezone(&Utc);

    Ok(NewsPost {
        id,
        title,
        content,
        created_at,
    })
}

fn timestamp_value(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl PostStore for SpannerPostStore {
    async fn list(&self) -> Result<Vec<NewsPost>, StoreError> {
        let statement = Statement::new(
            "SELECT id, title, content, created_at FROM news_posts ORDER BY created_at ASC, id ASC",
        );
        let posts = self.query_posts(statement).await?;
        tracing::debug!("Listed {} posts", posts.len());
        Ok(posts)
    }

    async fn find(&self, id: Uuid) -> Result<Option<NewsPost>, StoreError> {
        Ok(self.read(id).await?)
    }

    async fn insert(&self, post: &NewsPost) -> Result<(), StoreError> {
        let id_str = post.id.to_string();
        let created_at = timestamp_value(&post.created_at);

        let mutation = insert(
            TABLE,
            &["id", "title", "content", "created_at"],
            &[&id_str, &post.title, &post.content, &created_at],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to insert news post into Spanner")?;

        tracing::debug!("Inserted post with id: {}", post.id);
        Ok(())
    }

    async fn apply_changes(
        &self,
        id: Uuid,
        changes: &PostChanges,
    ) -> Result<Option<NewsPost>, StoreError> {
        let Some(mut post) = self.read(id).await? else {
            return Ok(None);
        };
        changes.apply_to(&mut post);

        let id_str = id.to_string();
        let mutation = update(
            TABLE,
            &["id", "title", "content"],
            &[&id_str, &post.title, &post.content],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to update news post in Spanner")?;

        tracing::debug!("Updated post with id: {}", id);
        Ok(Some(post))
    }

    async fn remove(&self, id: Uuid) -> Result<Option<NewsPost>, StoreError> {
        let Some(post) = self.read(id).await? else {
            return Ok(None);
        };

        let id_str = id.to_string();
        self.inner
            .apply(vec![delete(TABLE, Key::new(&id_str))])
            .await
            .context("Failed to delete news post from Spanner")?;

        tracing::debug!("Deleted post with id: {}", id);
        Ok(Some(post))
    }

    /// Run `SELECT 1` to verify the database is reachable
    async fn health_check(&self) -> Result<(), StoreError> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self
            .inner
            .single()
            .await
            .context("Failed to create health check transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute health check query")?;

        if result_set
            .next()
            .await
            .context("Failed to read health check result")?
            .is_some()
        {
            tracing::debug!("Health check query succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Health check query returned no results").into())
        }
    }
}

/// Create the Spanner instance, database and table when they are missing
///
/// Lets the portal start against an empty emulator with no manual setup.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Starting auto-provisioning checks...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    let project_path = format!("projects/{}", config.project);
    let instance_path = format!("{}/instances/{}", project_path, config.instance);
    let database_path = config.database_path();

    ensure_instance_exists(&admin_client, config, &project_path, &instance_path).await?;
    ensure_database_exists(&admin_client, &instance_path, &database_path).await?;
    ensure_table_exists(&admin_client, &database_path).await?;

    tracing::info!("Auto-provisioning complete");
    Ok(())
}

/// Turn an admin lookup into "exists or not"; only NotFound means missing
fn found<T>(lookup: Result<T, Status>, kind: &str) -> Result<bool> {
    match lookup {
        Ok(_) => Ok(true),
        Err(status) if status.code() == Code::NotFound => Ok(false),
        Err(e) => Err(anyhow::anyhow!(
            "Failed to check {} existence: {}",
            kind,
            e.message()
        )),
    }
}

/// Run `create` unless the resource already exists
async fn ensure<C, Fut>(kind: &str, path: &str, exists: bool, create: C) -> Result<()>
where
    C: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    if exists {
        tracing::info!("{} already exists: {}", kind, path);
        return Ok(());
    }

    tracing::info!("{} not found, creating: {}", kind, path);
    create().await?;
    tracing::info!("{} created successfully: {}", kind, path);
    Ok(())
}

async fn ensure_instance_exists(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    project_path: &str,
    instance_path: &str,
) -> Result<()> {
    let lookup = admin_client
        .instance()
        .get_instance(
            GetInstanceRequest {
                name: instance_path.to_string(),
                field_mask: None,
            },
            None,
        )
        .await;

    ensure("Instance", instance_path, found(lookup, "instance")?, || async move {
        let instance_config = if config.emulator_host.is_some() {
            format!("{}/instanceConfigs/emulator-config", project_path)
        } else {
            format!("{}/instanceConfigs/regional-us-central1", project_path)
        };

        let create_request = CreateInstanceRequest {
            parent: project_path.to_string(),
            instance_id: config.instance.clone(),
            instance: Some(Instance {
                name: instance_path.to_string(),
                config: instance_config,
                display_name: format!("{} instance", config.instance),
                node_count: 1,
                ..Default::default()
            }),
        };

        admin_client
            .instance()
            .create_instance(create_request, None)
            .await
            .context("Failed to start instance creation")?
            .wait(None)
            .await
            .context("Failed to create instance")?;
        Ok(())
    })
    .await
}

async fn ensure_database_exists(
    admin_client: &AdminClient,
    instance_path: &str,
    database_path: &str,
) -> Result<()> {
    let lookup = admin_client
        .database()
        .get_database(
            GetDatabaseRequest {
                name: database_path.to_string(),
            },
            None,
        )
        .await;

    ensure("Database", database_path, found(lookup, "database")?, || async move {
        let database_id = database_path
            .rsplit('/')
            .next()
            .context("Invalid database path")?;

        let create_request = CreateDatabaseRequest {
            parent: instance_path.to_string(),
            create_statement: format!("CREATE DATABASE `{}`", database_id),
            extra_statements: vec![],
            encryption_config: None,
            database_dialect: 1, // Google Standard SQL
            proto_descriptors: vec![],
        };

        admin_client
            .database()
            .create_database(create_request, None)
            .await
            .context("Failed to start database creation")?
            .wait(None)
            .await
            .context("Failed to create database")?;
        Ok(())
    })
    .await
}

fn declares_posts_table(statement: &str) -> bool {
    statement.contains("CREATE TABLE news_posts")
        || statement.contains("CREATE TABLE `news_posts`")
}

async fn ensure_table_exists(admin_client: &AdminClient, database_path: &str) -> Result<()> {
    let ddl = admin_client
        .database()
        .get_database_ddl(
            GetDatabaseDdlRequest {
                database: database_path.to_string(),
            },
            None,
        )
        .await
        .context("Failed to get database DDL")?
        .into_inner();

    let exists = ddl.statements.iter().any(|stmt| declares_posts_table(stmt));

    ensure("Table", TABLE, exists, || async move {
        let update_request = UpdateDatabaseDdlRequest {
            database: database_path.to_string(),
            statements: vec![CREATE_TABLE_DDL.trim().to_string()],
            operation_id: String::new(),
            proto_descriptors: vec![],
            throughput_mode: false,
        };

        admin_client
            .database()
            .update_database_ddl(update_request, None)
            .await
            .context("Failed to start table creation")?
            .wait(None)
            .await
            .context("Failed to create table")?;
        Ok(())
    })
    .await
}
