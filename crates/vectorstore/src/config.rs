use serde::{Deserialize, Serialize};

/// Configuration for the Qdrant connection and the embedding endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VectorStoreConfig {
    /// Qdrant gRPC endpoint. Falls back to the `QDRANT_URL` environment
    /// variable, then the local default.
    pub qdrant_url: String,
    /// Embedding endpoint.
    pub embedding_api_url: String,
    /// Embedding model identifier.
    pub embedding_model: String,
    /// Fixed dimensionality both collections are provisioned with.
    pub embedding_dim: u64,
    /// API key for the embedding provider. Falls back to `OPENAI_API_KEY`;
    /// when absent entirely, embedding generation is disabled and every
    /// add/search degrades to its safe default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Collection holding classified ticket vectors.
    pub tickets_collection: String,
    /// Collection holding knowledge-base article vectors.
    pub knowledge_base_collection: String,
    /// Per-request timeout for embedding calls, in seconds.
    pub timeout_secs: u64,
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            qdrant_url: std::env::var("QDRANT_URL")
                .unwrap_or_else(|_| "http://localhost:6334".into()),
            embedding_api_url: "https://api.openai.com/v1/embeddings".into(),
            embedding_model: "text-embedding-3-small".into(),
            embedding_dim: 1536,
            api_key: None,
            tickets_collection: "support_tickets".into(),
            knowledge_base_collection: "knowledge_base".into(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_default_values() {
        let cfg = VectorStoreConfig::default();
        assert_eq!(cfg.embedding_model, "text-embedding-3-small");
        assert_eq!(cfg.embedding_dim, 1536);
        assert_eq!(cfg.tickets_collection, "support_tickets");
        assert_eq!(cfg.knowledge_base_collection, "knowledge_base");
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn config_serde_round_trip() {
        let cfg = VectorStoreConfig {
            qdrant_url: "http://qdrant.internal:6334".into(),
            embedding_dim: 768,
            ..Default::default()
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let parsed: VectorStoreConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
    }
}
