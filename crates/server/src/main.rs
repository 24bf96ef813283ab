//! Triage Server - HTTP REST API for support ticket classification
//!
//! Classifies tickets with an LLM completion call and stores their
//! embeddings in Qdrant for similarity search.

use server::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Pick up OPENAI_API_KEY / QDRANT_URL from a local .env when present
    dotenvy::dotenv().ok();

    let config = ServerConfig::load()?;
    server::start_server(config).await?;

    Ok(())
}
