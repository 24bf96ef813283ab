//! HTTP REST API for LLM-backed support ticket triage.
//!
//! Exposes synchronous, asynchronous (queued), and batch classification,
//! similarity search over stored ticket vectors, and collection statistics.

pub mod config;
pub mod error;
pub mod examples;
pub mod jobs;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use jobs::ClassifyJob;
pub use server::start_server;
pub use state::AppState;
