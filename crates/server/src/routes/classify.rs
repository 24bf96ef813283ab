use crate::error::{ServerError, ServerResult};
use crate::examples::example_tickets;
use crate::jobs::ClassifyJob;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use model::{Classification, Ticket};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::mpsc::error::TrySendError;

/// Batch submission body
#[derive(Debug, Deserialize)]
pub struct BatchClassifyRequest {
    pub tickets: Vec<ClassifyJob>,
}

/// One entry of the batch response: either a classification or an error,
/// never both.
#[derive(Debug, Serialize)]
pub struct BatchEntry {
    pub ticket_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Batch response
#[derive(Debug, Serialize)]
pub struct BatchClassifyResponse {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: Vec<BatchEntry>,
}

/// Classify a single ticket synchronously.
///
/// Returns the ticket paired with its classification. The vector upsert
/// happens after classification and its failure is never surfaced here —
/// storage is an enhancement, the classification is the product.
pub async fn classify_ticket(
    State(state): State<AppState>,
    Json(ticket): Json<Ticket>,
) -> ServerResult<impl IntoResponse> {
    let classifier = state.classifier()?;

    let result = triage::classify_and_store(classifier, &state.store, &ticket)
        .await
        .map_err(|err| classification_error(&ticket.id, err))?;

    Ok(Json(result))
}

/// Queue a ticket for background classification and return immediately.
pub async fn classify_ticket_async(
    State(state): State<AppState>,
    Json(job): Json<ClassifyJob>,
) -> ServerResult<impl IntoResponse> {
    // Fail fast instead of queuing work that can never complete.
    if state.classifier.is_none() {
        return Err(ServerError::ClassifierUnavailable);
    }

    let ticket_id = job.ticket_id.clone();
    state.jobs.try_send(job).map_err(|err| match err {
        TrySendError::Full(_) => ServerError::QueueFull,
        TrySendError::Closed(_) => ServerError::Internal("job worker is not running".into()),
    })?;

    Ok(Json(json!({
        "status": "queued",
        "ticket_id": ticket_id,
    })))
}

/// Classify a batch of tickets sequentially.
///
/// Each ticket's classification and storage complete before the next
/// begins; a single failure is recorded in its entry and never aborts the
/// rest of the batch.
pub async fn classify_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchClassifyRequest>,
) -> ServerResult<impl IntoResponse> {
    let classifier = state.classifier()?;

    let mut results = Vec::with_capacity(request.tickets.len());
    for job in request.tickets {
        let ticket = job.into_ticket();
        let entry = match triage::classify_and_store(classifier, &state.store, &ticket).await {
            Ok(result) => BatchEntry {
                ticket_id: ticket.id,
                classification: Some(result.classification),
                error: None,
            },
            Err(err) => BatchEntry {
                ticket_id: ticket.id,
                classification: None,
                error: Some(err.to_string()),
            },
        };
        results.push(entry);
    }

    Ok(Json(batch_summary(results)))
}

/// Classify all five fixture tickets and store their vectors.
///
/// Unlike the batch route this fails the whole request on the first error,
/// naming the offending fixture — it exists to demo the pipeline, and a demo
/// that half-works is more confusing than one that reports its failure.
pub async fn classify_examples(State(state): State<AppState>) -> ServerResult<impl IntoResponse> {
    let classifier = state.classifier()?;

    let mut results = Vec::new();
    for ticket in example_tickets() {
        let result = triage::classify_and_store(classifier, &state.store, &ticket)
            .await
            .map_err(|err| example_error(&ticket.id, err))?;
        results.push(result);
    }

    Ok(Json(json!({
        "total": results.len(),
        "results": results,
    })))
}

fn batch_summary(results: Vec<BatchEntry>) -> BatchClassifyResponse {
    let successful = results.iter().filter(|r| r.error.is_none()).count();
    let failed = results.len() - successful;

    BatchClassifyResponse {
        total: results.len(),
        successful,
        failed,
        results,
    }
}

fn example_error(ticket_id: &str, err: triage::PipelineError) -> ServerError {
    ServerError::Internal(format!("example ticket {ticket_id} failed: {err}"))
}

fn classification_error(ticket_id: &str, err: triage::PipelineError) -> ServerError {
    match err {
        triage::PipelineError::Classifier(source) => ServerError::Classification {
            ticket_id: ticket_id.to_string(),
            source,
        },
        triage::PipelineError::Store(err) => ServerError::Internal(err.to_string()),
    }
}
