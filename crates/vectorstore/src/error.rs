use thiserror::Error;

/// Errors surfaced while connecting to or provisioning the vector store.
///
/// Per-operation I/O failures (add, search, stats) are deliberately NOT
/// errors at the public surface: the adapter logs them and returns the safe
/// default (`false`, empty results, zero counts), because vector storage is
/// an enhancement to classification, not a prerequisite for it.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The adapter configuration is unusable.
    #[error("invalid vector store config: {0}")]
    Config(String),
    /// Could not build a client for the configured Qdrant URL.
    #[error("failed to connect to Qdrant: {0}")]
    Connection(String),
    /// Qdrant rejected a provisioning call.
    #[error("Qdrant error: {0}")]
    Qdrant(String),
    /// The embedding endpoint failed in a way that prevents startup checks.
    #[error("embedding error: {0}")]
    Embedding(String),
}

impl From<qdrant_client::QdrantError> for StoreError {
    fn from(err: qdrant_client::QdrantError) -> Self {
        StoreError::Qdrant(err.to_string())
    }
}
