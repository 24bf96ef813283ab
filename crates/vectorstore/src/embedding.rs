use crate::{StoreError, VectorStoreConfig};
use serde_json::{json, Value};
use std::time::Duration;

/// Thin client for the embedding endpoint.
///
/// Fails closed: any failure — disabled key, transport error, malformed
/// response — logs and yields an empty vector. The caller decides whether
/// that is fatal for its operation.
pub struct EmbeddingClient {
    http: reqwest::Client,
    api_url: String,
    model: String,
    api_key: Option<String>,
}

impl EmbeddingClient {
    pub fn new(cfg: &VectorStoreConfig) -> Result<Self, StoreError> {
        let api_key = cfg
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.is_empty());

        if api_key.is_none() {
            tracing::warn!("no embedding API key configured; embeddings disabled");
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StoreError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            http,
            api_url: cfg.embedding_api_url.clone(),
            model: cfg.embedding_model.clone(),
            api_key,
        })
    }

    /// Embed a single text blob. Empty vector on any failure.
    pub async fn embed(&self, text: &str) -> Vec<f32> {
        match self.request_embedding(text).await {
            Ok(vector) => vector,
            Err(err) => {
                tracing::error!(error = %err, "embedding generation failed");
                Vec::new()
            }
        }
    }

    async fn request_embedding(&self, text: &str) -> Result<Vec<f32>, StoreError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| StoreError::Embedding("embedding client not initialized".into()))?;

        let response = self
            .http
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&json!({ "input": text, "model": self.model }))
            .send()
            .await
            .map_err(|e| StoreError::Embedding(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(StoreError::Embedding(format!("HTTP {status}: {body}")));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| StoreError::Embedding(format!("invalid JSON response: {e}")))?;

        parse_embedding(&body)
    }
}

/// Pull `data[0].embedding` out of an embedding API response.
pub(crate) fn parse_embedding(body: &Value) -> Result<Vec<f32>, StoreError> {
    let values = body["data"][0]["embedding"]
        .as_array()
        .ok_or_else(|| StoreError::Embedding("response missing data[0].embedding".into()))?;

    values
        .iter()
        .map(|entry| {
            entry
                .as_f64()
                .map(|f| f as f32)
                .ok_or_else(|| StoreError::Embedding("non-numeric embedding entry".into()))
        })
        .collect()
}
