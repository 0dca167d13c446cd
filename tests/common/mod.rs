#![allow(dead_code)]

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use outline_api::database::MemoryStore;
use outline_api::{app, AppState};

pub fn static_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

/// Router backed by a fresh in-memory store
pub fn memory_app() -> Router {
    app(AppState::new(Arc::new(MemoryStore::new())), &static_dir())
}

/// Drive one request through the router and return the raw body.
pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Vec<u8>)> {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body)?).await?;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, bytes.to_vec()))
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> Result<(StatusCode, Value)> {
    let (status, bytes) = send_raw(app, method, uri, body).await?;
    let json = serde_json::from_slice(&bytes)
        .with_context(|| format!("non-JSON body: {}", String::from_utf8_lossy(&bytes)))?;
    Ok((status, json))
}

/// A running server binary pointed at TEST_DATABASE_URL. Killed on drop.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn(database_url: &str) -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let child = Command::new(env!("CARGO_BIN_EXE_outline-api"))
            .env("PORT", port.to_string())
            .env("DATABASE_URL", database_url)
            .env("STATIC_DIR", static_dir())
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        let url = format!("{}/health", self.base_url);
        while Instant::now() < deadline {
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == reqwest::StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

pub fn test_database_url() -> Option<String> {
    let url = std::env::var("TEST_DATABASE_URL").ok();
    if url.is_none() {
        eprintln!("TEST_DATABASE_URL not set; skipping PostgreSQL test");
    }
    url
}

/// Start the server binary against `database_url` and wait for a healthy database.
pub async fn start_server(database_url: &str) -> Result<TestServer> {
    let server = TestServer::spawn(database_url)?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Start a server against PostgreSQL, or `None` when TEST_DATABASE_URL is unset.
pub async fn postgres_server() -> Result<Option<TestServer>> {
    match test_database_url() {
        Some(url) => Ok(Some(start_server(&url).await?)),
        None => Ok(None),
    }
}

static SCHEMA_SEQ: AtomicU32 = AtomicU32::new(0);

/// A private PostgreSQL schema. Servers started with `database_url` see only
/// the tables inside it, so tests can assert exact positions.
pub struct TestSchema {
    pub name: String,
    pub database_url: String,
    pool: PgPool,
}

impl TestSchema {
    pub async fn create(base_url: &str) -> Result<Self> {
        let name = format!(
            "outline_test_{}_{}",
            std::process::id(),
            SCHEMA_SEQ.fetch_add(1, Ordering::SeqCst)
        );

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(base_url)
            .await
            .context("failed to connect to TEST_DATABASE_URL")?;
        sqlx::query(&format!("CREATE SCHEMA {}", name))
            .execute(&pool)
            .await?;

        let mut url = url::Url::parse(base_url).context("invalid TEST_DATABASE_URL")?;
        url.query_pairs_mut()
            .append_pair("options", &format!("-c search_path={}", name));

        Ok(Self {
            name,
            database_url: url.into(),
            pool,
        })
    }

    /// Run a statement with `{schema}` replaced by this schema's name.
    pub async fn execute(&self, sql: &str) -> Result<()> {
        sqlx::query(&sql.replace("{schema}", &self.name))
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn drop_schema(self) -> Result<()> {
        sqlx::query(&format!("DROP SCHEMA {} CASCADE", self.name))
            .execute(&self.pool)
            .await?;
        self.pool.close().await;
        Ok(())
    }
}
