#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::{json, Value};

use users_api::config::AppConfig;
use users_api::database::MemoryUserStore;
use users_api::{router, AppState};

/// Exactly ten characters after the prefix, the shortest accepted token
pub const TOKEN: &str = "Bearer abcdefghij";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = self.client.get(self.url("/health")).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }

    /// POST /users with the valid token
    pub async fn create(&self, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .post(self.url("/users"))
            .header("Authorization", TOKEN)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn get(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .get(self.url(path))
            .header("Authorization", TOKEN)
            .send()
            .await?)
    }

    pub async fn put(&self, path: &str, body: Value) -> Result<reqwest::Response> {
        Ok(self
            .client
            .put(self.url(path))
            .header("Authorization", TOKEN)
            .json(&body)
            .send()
            .await?)
    }

    pub async fn delete(&self, path: &str) -> Result<reqwest::Response> {
        Ok(self
            .client
            .delete(self.url(path))
            .header("Authorization", TOKEN)
            .send()
            .await?)
    }
}

pub fn user(first: &str, last: &str, email: &str) -> Value {
    json!({ "firstName": first, "lastName": last, "email": email })
}

/// Start the app on a free port with a fresh in-memory store
pub async fn spawn_server() -> Result<TestServer> {
    // Pick an unused port for isolation
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let base_url = format!("http://127.0.0.1:{}", port);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
        .await
        .with_context(|| format!("failed to bind port {}", port))?;

    let state = AppState::new(Arc::new(MemoryUserStore::new()));
    let app = router(state, &AppConfig::development());

    tokio::spawn(async move {
        let _ = axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await;
    });

    let server = TestServer {
        port,
        base_url,
        client: reqwest::Client::new(),
    };
    server.wait_ready(Duration::from_secs(5)).await?;
    Ok(server)
}
