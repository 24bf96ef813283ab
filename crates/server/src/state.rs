use crate::config::ServerConfig;
use crate::jobs::ClassifyJob;
use classifier::TicketClassifier;
use std::sync::Arc;
use tokio::sync::mpsc;
use vectorstore::VectorStore;

/// Shared application state
///
/// The classifier and vector store are long-lived clients constructed once
/// at startup and shared across requests; neither holds per-request mutable
/// state, so no locking is needed here.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,

    /// Classifier, absent when no API key was configured at startup.
    /// Classification routes answer 503 until the process is restarted
    /// with a key.
    pub classifier: Option<Arc<TicketClassifier>>,

    /// Vector store adapter (shared across requests)
    pub store: Arc<VectorStore>,

    /// Producer side of the asynchronous classification queue
    pub jobs: mpsc::Sender<ClassifyJob>,
}

impl AppState {
    pub fn new(
        config: ServerConfig,
        classifier: Option<Arc<TicketClassifier>>,
        store: Arc<VectorStore>,
        jobs: mpsc::Sender<ClassifyJob>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            classifier,
            store,
            jobs,
        }
    }

    /// The classifier, or the "service unavailable" condition.
    pub fn classifier(&self) -> Result<&Arc<TicketClassifier>, crate::error::ServerError> {
        self.classifier
            .as_ref()
            .ok_or(crate::error::ServerError::ClassifierUnavailable)
    }
}
