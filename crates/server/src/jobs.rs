//! Background classification queue.
//!
//! The asynchronous submission path hands tickets to an in-process worker
//! and returns immediately. The worker runs the exact same
//! `classify_and_store` pipeline as the inline route, so there is a single
//! downstream sequence regardless of how a ticket arrives. Delivery is
//! best-effort: no retry, no durable job state — callers that need
//! at-least-once semantics put a real queue in front of the API.

use classifier::TicketClassifier;
use model::Ticket;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vectorstore::VectorStore;

/// Message contract for the asynchronous classification path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifyJob {
    pub ticket_id: String,
    pub subject: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl ClassifyJob {
    pub fn from_ticket(ticket: &Ticket) -> Self {
        Self {
            ticket_id: ticket.id.clone(),
            subject: ticket.subject.clone(),
            description: ticket.description.clone(),
            customer_email: ticket.customer_email.clone(),
        }
    }

    pub fn into_ticket(self) -> Ticket {
        Ticket {
            id: self.ticket_id,
            subject: self.subject,
            description: self.description,
            customer_email: self.customer_email,
        }
    }
}

/// Spawn the worker that drains the classification queue.
///
/// Jobs arriving while the classifier is unavailable are dropped with a
/// warning; the submission route already told the caller the service was
/// degraded.
pub fn spawn_worker(
    classifier: Option<Arc<TicketClassifier>>,
    store: Arc<VectorStore>,
    mut jobs: mpsc::Receiver<ClassifyJob>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(job) = jobs.recv().await {
            let ticket = job.into_ticket();

            let Some(classifier) = classifier.as_ref() else {
                tracing::warn!(ticket_id = %ticket.id, "dropping job: classifier unavailable");
                continue;
            };

            match triage::classify_and_store(classifier, &store, &ticket).await {
                Ok(result) => {
                    // Result contract: ticket id plus the full classification.
                    tracing::info!(
                        ticket_id = %result.ticket.id,
                        urgency = %result.classification.urgency,
                        intent = %result.classification.intent,
                        product = %result.classification.product,
                        confidence = result.classification.confidence,
                        "background classification complete"
                    );
                }
                Err(err) => {
                    tracing::error!(
                        ticket_id = %ticket.id,
                        error = %err,
                        "background classification failed"
                    );
                }
            }
        }
        tracing::info!("classification queue closed, worker exiting");
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_round_trips_through_ticket() {
        let ticket = Ticket {
            id: "T-1".into(),
            subject: "Prod down".into(),
            description: "500s everywhere".into(),
            customer_email: Some("cto@acme.example".into()),
        };

        let job = ClassifyJob::from_ticket(&ticket);
        assert_eq!(job.ticket_id, "T-1");
        assert_eq!(job.into_ticket(), ticket);
    }

    #[test]
    fn job_wire_shape_matches_contract() {
        let job: ClassifyJob = serde_json::from_str(
            r#"{"ticket_id":"T-2","subject":"s","description":"d"}"#,
        )
        .unwrap();
        assert_eq!(job.ticket_id, "T-2");
        assert!(job.customer_email.is_none());

        let out = serde_json::to_value(&job).unwrap();
        assert_eq!(out["ticket_id"], "T-2");
        assert!(out.get("customer_email").is_none());
    }
}
