//! Vector storage and similarity search for classified tickets.
//!
//! Turns classified tickets into searchable vectors in Qdrant and answers
//! nearest-neighbor queries. Provisioning failures are hard errors at
//! startup; per-operation I/O failures are logged and converted to safe
//! defaults so a storage hiccup never loses a classification that was
//! already computed.

mod config;
mod embedding;
mod error;

pub use config::VectorStoreConfig;
pub use embedding::EmbeddingClient;
pub use error::StoreError;

use model::{Classification, UrgencyLevel};
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    Condition, CreateCollectionBuilder, Distance, Filter, PointStruct, ScoredPoint,
    SearchPointsBuilder, UpsertPointsBuilder, Value as QdrantValue, VectorParamsBuilder,
};
use qdrant_client::{Payload, Qdrant};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One search hit: Qdrant's similarity score plus the stored payload.
///
/// Payload fields are optional because entries written by older deployments
/// may lack them; a sparse hit is still a hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimilarTicket {
    pub similarity_score: f32,
    pub ticket_id: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub urgency: Option<String>,
    pub intent: Option<String>,
    pub product: Option<String>,
    pub confidence: Option<f64>,
}

/// Point counts per collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub tickets_count: u64,
    pub knowledge_base_count: u64,
    pub total_vectors: u64,
}

/// Derive the numeric point id for a ticket id.
///
/// Full-width 64-bit hash, deterministic across processes, so re-adding the
/// same ticket id upserts over the existing point instead of duplicating it.
pub fn point_id(ticket_id: &str) -> u64 {
    fxhash::hash64(ticket_id)
}

/// Qdrant-backed adapter for ticket embeddings.
///
/// Long-lived clients, no per-request mutable state; share one instance
/// across requests behind an `Arc`.
pub struct VectorStore {
    cfg: VectorStoreConfig,
    client: Qdrant,
    embedder: EmbeddingClient,
}

impl VectorStore {
    /// Connect to Qdrant and idempotently provision both collections.
    pub async fn connect(cfg: VectorStoreConfig) -> Result<Self, StoreError> {
        let client = Qdrant::from_url(&cfg.qdrant_url)
            .build()
            .map_err(|e| StoreError::Connection(e.to_string()))?;
        let embedder = EmbeddingClient::new(&cfg)?;

        let store = Self {
            cfg,
            client,
            embedder,
        };
        store.ensure_collections().await?;
        tracing::info!(url = %store.cfg.qdrant_url, "connected to Qdrant");
        Ok(store)
    }

    /// Create the tickets and knowledge-base collections when absent.
    ///
    /// Safe to call repeatedly: existing collections are left untouched and
    /// never dropped.
    pub async fn ensure_collections(&self) -> Result<(), StoreError> {
        for name in [
            &self.cfg.tickets_collection,
            &self.cfg.knowledge_base_collection,
        ] {
            if self.client.collection_exists(name).await? {
                tracing::debug!(collection = %name, "collection already exists");
                continue;
            }
            self.client
                .create_collection(
                    CreateCollectionBuilder::new(name).vectors_config(VectorParamsBuilder::new(
                        self.cfg.embedding_dim,
                        Distance::Cosine,
                    )),
                )
                .await?;
            tracing::info!(collection = %name, dim = self.cfg.embedding_dim, "created collection");
        }
        Ok(())
    }

    /// Generate an embedding for a text blob. Empty vector on failure.
    pub async fn generate_embedding(&self, text: &str) -> Vec<f32> {
        self.embedder.embed(text).await
    }

    /// Embed and upsert one classified ticket into the tickets collection.
    ///
    /// Returns `false` without raising when embedding generation or the
    /// upsert fails — the classification already computed upstream must
    /// still reach the caller.
    pub async fn add_ticket(
        &self,
        ticket_id: &str,
        subject: &str,
        description: &str,
        classification: &Classification,
    ) -> bool {
        let combined = format!("{subject}\n\n{description}");
        let embedding = self.generate_embedding(&combined).await;
        if embedding.is_empty() {
            return false;
        }

        let payload = match Payload::try_from(ticket_payload(
            ticket_id,
            subject,
            description,
            classification,
        )) {
            Ok(payload) => payload,
            Err(err) => {
                tracing::error!(ticket_id, error = %err, "failed to build payload");
                return false;
            }
        };

        let point = PointStruct::new(point_id(ticket_id), embedding, payload);
        match self
            .client
            .upsert_points(UpsertPointsBuilder::new(
                &self.cfg.tickets_collection,
                vec![point],
            ))
            .await
        {
            Ok(_) => {
                tracing::info!(ticket_id, "stored ticket vector");
                true
            }
            Err(err) => {
                tracing::error!(ticket_id, error = %err, "failed to upsert ticket vector");
                false
            }
        }
    }

    /// Nearest-neighbor search over stored tickets.
    ///
    /// Results keep Qdrant's native decreasing-similarity order and never
    /// exceed `limit`. Any failure yields an empty list.
    pub async fn search_similar_tickets(
        &self,
        query: &str,
        limit: u64,
        urgency_filter: Option<UrgencyLevel>,
    ) -> Vec<SimilarTicket> {
        let query_embedding = self.generate_embedding(query).await;
        if query_embedding.is_empty() {
            return Vec::new();
        }

        let mut search =
            SearchPointsBuilder::new(&self.cfg.tickets_collection, query_embedding, limit)
                .with_payload(true);
        if let Some(urgency) = urgency_filter {
            search = search.filter(urgency_condition(urgency));
        }

        match self.client.search_points(search).await {
            Ok(response) => {
                tracing::debug!(hits = response.result.len(), "similar ticket search");
                response.result.into_iter().map(hit_to_similar).collect()
            }
            Err(err) => {
                tracing::error!(error = %err, "similar ticket search failed");
                Vec::new()
            }
        }
    }

    /// Point counts for both collections. All zeros on any error.
    pub async fn get_collection_stats(&self) -> CollectionStats {
        let tickets = self.points_count(&self.cfg.tickets_collection).await;
        let knowledge = self.points_count(&self.cfg.knowledge_base_collection).await;
        match (tickets, knowledge) {
            (Some(tickets_count), Some(knowledge_base_count)) => CollectionStats {
                tickets_count,
                knowledge_base_count,
                total_vectors: tickets_count + knowledge_base_count,
            },
            _ => CollectionStats::default(),
        }
    }

    async fn points_count(&self, collection: &str) -> Option<u64> {
        match self.client.collection_info(collection).await {
            Ok(info) => Some(info.result?.points_count.unwrap_or(0)),
            Err(err) => {
                tracing::error!(collection, error = %err, "failed to fetch collection info");
                None
            }
        }
    }
}

/// Exact-match filter on the stored urgency literal.
fn urgency_condition(urgency: UrgencyLevel) -> Filter {
    Filter::must([Condition::matches(
        "urgency",
        urgency.as_str().to_string(),
    )])
}

/// Flattened payload mirrored alongside each ticket vector.
fn ticket_payload(
    ticket_id: &str,
    subject: &str,
    description: &str,
    classification: &Classification,
) -> serde_json::Value {
    serde_json::json!({
        "ticket_id": ticket_id,
        "subject": subject,
        "description": description,
        "urgency": classification.urgency.as_str(),
        "intent": classification.intent.as_str(),
        "product": classification.product.as_str(),
        "confidence": classification.confidence,
        "reasoning": classification.reasoning,
    })
}

/// Map one Qdrant hit into the public result shape.
fn hit_to_similar(hit: ScoredPoint) -> SimilarTicket {
    SimilarTicket {
        similarity_score: hit.score,
        ticket_id: payload_str(&hit.payload, "ticket_id"),
        subject: payload_str(&hit.payload, "subject"),
        description: payload_str(&hit.payload, "description"),
        urgency: payload_str(&hit.payload, "urgency"),
        intent: payload_str(&hit.payload, "intent"),
        product: payload_str(&hit.payload, "product"),
        confidence: payload_f64(&hit.payload, "confidence"),
    }
}

fn payload_str(payload: &HashMap<String, QdrantValue>, key: &str) -> Option<String> {
    match payload.get(key).and_then(|v| v.kind.as_ref()) {
        Some(Kind::StringValue(s)) => Some(s.clone()),
        _ => None,
    }
}

fn payload_f64(payload: &HashMap<String, QdrantValue>, key: &str) -> Option<f64> {
    match payload.get(key).and_then(|v| v.kind.as_ref()) {
        Some(Kind::DoubleValue(d)) => Some(*d),
        Some(Kind::IntegerValue(i)) => Some(*i as f64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{IntentType, ProductArea};

    fn sample_classification() -> Classification {
        Classification {
            urgency: UrgencyLevel::Critical,
            intent: IntentType::BugReport,
            product: ProductArea::Api,
            confidence: 0.95,
            reasoning: "Production outage.".into(),
        }
    }

    fn string_value(s: &str) -> QdrantValue {
        QdrantValue {
            kind: Some(Kind::StringValue(s.into())),
        }
    }

    fn double_value(d: f64) -> QdrantValue {
        QdrantValue {
            kind: Some(Kind::DoubleValue(d)),
        }
    }

    #[test]
    fn point_id_is_stable_and_full_width() {
        let a = point_id("TICKET-001");
        let b = point_id("TICKET-001");
        assert_eq!(a, b);

        // Full 64-bit range, not reduced modulo 10^10 like earlier schemes.
        assert_ne!(point_id("TICKET-001"), point_id("TICKET-002"));
        let spread = [
            point_id("a"),
            point_id("b"),
            point_id("c"),
            point_id("TICKET-0001"),
        ];
        assert!(spread.iter().any(|id| *id > 10u64.pow(10)));
    }

    #[test]
    fn ticket_payload_flattens_classification_fields() {
        let payload = ticket_payload("T-1", "Prod down", "500s everywhere", &sample_classification());
        assert_eq!(payload["ticket_id"], "T-1");
        assert_eq!(payload["subject"], "Prod down");
        assert_eq!(payload["urgency"], "critical");
        assert_eq!(payload["intent"], "bug_report");
        assert_eq!(payload["product"], "api");
        assert_eq!(payload["confidence"], 0.95);
        assert_eq!(payload["reasoning"], "Production outage.");
    }

    #[test]
    fn payload_converts_to_qdrant_payload() {
        let value = ticket_payload("T-1", "s", "d", &sample_classification());
        assert!(Payload::try_from(value).is_ok());
    }

    #[test]
    fn hit_mapping_preserves_score_and_payload() {
        let mut payload = HashMap::new();
        payload.insert("ticket_id".to_string(), string_value("T-1"));
        payload.insert("subject".to_string(), string_value("Prod down"));
        payload.insert("urgency".to_string(), string_value("critical"));
        payload.insert("confidence".to_string(), double_value(0.95));

        let hit = ScoredPoint {
            score: 0.87,
            payload,
            ..Default::default()
        };

        let similar = hit_to_similar(hit);
        assert_eq!(similar.similarity_score, 0.87);
        assert_eq!(similar.ticket_id.as_deref(), Some("T-1"));
        assert_eq!(similar.subject.as_deref(), Some("Prod down"));
        assert_eq!(similar.urgency.as_deref(), Some("critical"));
        assert_eq!(similar.confidence, Some(0.95));
        // Fields absent from the payload stay None rather than failing the hit.
        assert!(similar.description.is_none());
        assert!(similar.intent.is_none());
    }

    #[test]
    fn hit_mapping_keeps_native_ranking_order() {
        let hits = vec![
            ScoredPoint {
                score: 0.91,
                ..Default::default()
            },
            ScoredPoint {
                score: 0.55,
                ..Default::default()
            },
            ScoredPoint {
                score: 0.12,
                ..Default::default()
            },
        ];

        let results: Vec<SimilarTicket> = hits.into_iter().map(hit_to_similar).collect();
        let scores: Vec<f32> = results.iter().map(|r| r.similarity_score).collect();
        assert_eq!(scores, vec![0.91, 0.55, 0.12]);
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn urgency_condition_targets_the_urgency_key() {
        let filter = urgency_condition(UrgencyLevel::High);
        assert_eq!(filter.must.len(), 1);
        assert!(filter.should.is_empty());
        assert!(filter.must_not.is_empty());
    }

    #[test]
    fn stats_default_is_all_zero() {
        let stats = CollectionStats::default();
        assert_eq!(stats.tickets_count, 0);
        assert_eq!(stats.knowledge_base_count, 0);
        assert_eq!(stats.total_vectors, 0);
    }
}
