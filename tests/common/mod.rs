#![allow(dead_code)]

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};

use task_management_api::api::{self, state::AppState};
use task_management_api::config::AppConfig;
use task_management_api::database::Database;

/// A server on its own port with a private in-memory store, running on the
/// calling test's runtime so it stops when the test ends.
pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: Client,
}

impl TestServer {
    pub async fn spawn() -> Result<Self> {
        let mut config = AppConfig::development();
        config.database.url = Some("sqlite::memory:".to_string());
        let config = config.resolve()?;

        let db = Database::connect(&config.database).await?;
        db.migrate().await?;
        let app = api::router(AppState::new(config, db)?);

        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .with_context(|| format!("failed to bind {}", base_url))?;

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                eprintln!("test server stopped: {e}");
            }
        });

        let server = Self {
            port,
            base_url,
            client: Client::new(),
        };
        server.wait_ready(Duration::from_secs(10)).await?;
        Ok(server)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        while Instant::now() < deadline {
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    pub async fn register(&self, email: &str, password: &str) -> Result<Response> {
        let resp = self
            .client
            .post(self.url("/api/auth/register"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(resp)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<Response> {
        let resp = self
            .client
            .post(self.url("/api/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        Ok(resp)
    }

    /// Registers a fresh account and returns its bearer token.
    pub async fn token_for(&self, email: &str) -> Result<String> {
        let resp = self.register(email, "password123").await?;
        anyhow::ensure!(resp.status() == StatusCode::OK, "register failed: {}", resp.status());
        let body: Value = resp.json().await?;
        body["token"]
            .as_str()
            .map(str::to_string)
            .context("register response had no token")
    }

    pub async fn create_task(&self, token: &str, body: Value) -> Result<Value> {
        let resp = self
            .client
            .post(self.url("/api/tasks"))
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;
        anyhow::ensure!(resp.status() == StatusCode::CREATED, "create failed: {}", resp.status());
        Ok(resp.json().await?)
    }
}

/// Asserts the RFC 9457 shape and returns the body for further checks.
pub async fn expect_problem(resp: Response, status: StatusCode, title: &str) -> Result<Value> {
    assert_eq!(resp.status(), status);
    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert_eq!(content_type, "application/problem+json");

    let body: Value = resp.json().await?;
    assert_eq!(body["status"], status.as_u16());
    assert_eq!(body["title"], title);
    assert!(body["type"].as_str().unwrap_or_default().starts_with("https://tools.ietf.org/html/rfc9110#section-"));
    assert!(body["detail"].is_string());
    Ok(body)
}
