//! Server initialization and routing
//!
//! Axum server setup: router configuration, middleware stack, dependency
//! construction (classifier, vector store, job worker), and graceful
//! shutdown handling.

use crate::config::ServerConfig;
use crate::jobs;
use crate::middleware::{log_requests, request_id};
use crate::routes::{api_info, classify, health, not_found, search};
use crate::state::AppState;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::{get, post};
use axum::Router;
use classifier::{ClassifierConfig, TicketClassifier};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use vectorstore::{VectorStore, VectorStoreConfig};

/// Build the Axum router with all routes and middleware
fn build_router(state: AppState) -> Router {
    let cors = if state.config.enable_cors {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
    };

    let timeout = TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, state.config.timeout());

    Router::new()
        .route("/", get(api_info))
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .route("/examples", get(health::examples))
        .route("/api/v1/classify", post(classify::classify_ticket))
        .route(
            "/api/v1/classify/async",
            post(classify::classify_ticket_async),
        )
        .route("/api/v1/classify/batch", post(classify::classify_batch))
        .route("/api/v1/search", get(search::search_tickets))
        .route("/api/v1/stats", get(search::collection_stats))
        .route("/classify-examples", get(classify::classify_examples))
        .fallback(not_found)
        // Outermost first: tracing sees every request, the timeout sits
        // closest to the handlers.
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(log_requests))
                .layer(from_fn(request_id))
                .layer(cors)
                .layer(CompressionLayer::new())
                .layer(timeout),
        )
        .with_state(state)
}

/// Start the triage HTTP server
///
/// Builds the classifier (absent key degrades to 503 on classification
/// routes rather than refusing to start), connects to Qdrant, spawns the
/// background job worker, and serves until SIGTERM or Ctrl+C.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(&config.log_level)
        .with_target(false)
        .json()
        .init();

    // Classification is optional at startup: without a key the process still
    // serves search, stats, and health.
    let classifier = match TicketClassifier::new(ClassifierConfig::default()) {
        Ok(classifier) => Some(Arc::new(classifier)),
        Err(err) => {
            tracing::warn!(error = %err, "classifier disabled");
            None
        }
    };

    let store = Arc::new(VectorStore::connect(VectorStoreConfig::default()).await?);

    let (job_tx, job_rx) = tokio::sync::mpsc::channel(config.job_queue_depth);
    let worker = jobs::spawn_worker(classifier.clone(), store.clone(), job_rx);

    let state = AppState::new(config.clone(), classifier, store, job_tx);
    let app = build_router(state);

    let addr: SocketAddr = config.socket_addr()?;
    tracing::info!(
        %addr,
        timeout_secs = config.timeout_secs,
        queue_depth = config.job_queue_depth,
        "starting triage server"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Dropping the state closed the queue sender; let the worker drain.
    worker.await.ok();
    tracing::info!("server shutdown complete");
    Ok(())
}

/// Shutdown signal handler
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C, shutting down..."),
        _ = terminate => tracing::info!("received SIGTERM, shutting down..."),
    }
}
