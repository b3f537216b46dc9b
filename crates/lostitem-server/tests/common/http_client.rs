//! HTTP client helpers for tests.

use lostitem::matcher::{MATCH_STATUS_HEADER, MatchResult};
use serde_json::json;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct TestClient {
    client: reqwest::Client,
    base_url: String,
}

impl TestClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        format!("{}/{}", self.base_url, path)
    }

    /// Posts to `/v1/match`, returning the status header and decoded body.
    pub async fn match_type(&self, item_type: &str) -> reqwest::Result<(String, MatchResult)> {
        let response = self
            .client
            .post(self.url("/v1/match"))
            .json(&json!({ "type": item_type }))
            .send()
            .await?
            .error_for_status()?;

        let status = response
            .headers()
            .get(MATCH_STATUS_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        Ok((status, response.json().await?))
    }

    pub async fn candidates(&self, item_type: &str, k: usize) -> reqwest::Result<reqwest::Response> {
        self.client
            .post(self.url("/v1/candidates"))
            .json(&json!({ "type": item_type, "k": k }))
            .send()
            .await
    }

    pub async fn get(&self, path: &str) -> reqwest::Result<reqwest::Response> {
        self.client.get(self.url(path)).send().await
    }
}
