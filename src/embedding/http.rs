use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::{Embedding, EmbeddingProvider, ProviderError};
use crate::config::Config;

/// Body of `POST /encode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeRequest {
    #[serde(rename = "type")]
    pub item_type: String,
}

/// Response of `POST /encode`: batch-shaped even for one input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodeResponse {
    #[serde(default)]
    pub embeddings: Vec<Vec<f32>>,
}

/// Embedding provider backed by the model server's `POST {base_url}/encode`.
#[derive(Debug, Clone)]
pub struct HttpEmbeddingProvider {
    http: HttpClient,
    endpoint: String,
}

impl HttpEmbeddingProvider {
    /// Creates a provider whose requests are bounded by `timeout`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ProviderError> {
        let http = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/encode", base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        Self::new(&config.model_server_url, config.provider_timeout)
    }

    /// Full URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl EmbeddingProvider for HttpEmbeddingProvider {
    #[instrument(skip(self, text), fields(text_len = text.len()))]
    async fn embed(&self, text: &str) -> Result<Embedding, ProviderError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&EncodeRequest {
                item_type: text.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let body: EncodeResponse = response.json().await?;
        let embedding = first_embedding(body)?;
        debug!(dimension = embedding.len(), "Query embedded");
        Ok(embedding)
    }
}

/// Extracts the single query row from a batch-shaped response.
pub(crate) fn first_embedding(body: EncodeResponse) -> Result<Embedding, ProviderError> {
    let embedding =
        body.embeddings
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::MalformedResponse {
                reason: "response contained no embeddings".to_string(),
            })?;

    if embedding.is_empty() {
        return Err(ProviderError::MalformedResponse {
            reason: "embedding is empty".to_string(),
        });
    }
    if embedding.iter().any(|v| !v.is_finite()) {
        return Err(ProviderError::MalformedResponse {
            reason: "embedding contains non-finite values".to_string(),
        });
    }

    Ok(embedding)
}
