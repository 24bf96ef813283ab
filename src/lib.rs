//! Workspace umbrella crate for the ticket triage pipeline.
//!
//! This crate stitches classification and vector storage together so callers
//! can run a ticket through the whole pipeline with a single API entry point.
//! Both the inline HTTP path and the background job worker call the same two
//! functions here — there is exactly one classify-then-store sequence in the
//! system.

pub use classifier::{parse_classification, ClassifierConfig, ClassifierError, TicketClassifier};
pub use model::{
    Classification, IntentType, ProductArea, Ticket, TicketWithClassification, UnknownLiteral,
    UrgencyLevel,
};
pub use vectorstore::{
    point_id, CollectionStats, SimilarTicket, StoreError, VectorStore, VectorStoreConfig,
};

use std::error::Error;
use std::fmt;

/// Errors that can occur while running a ticket through the pipeline.
#[derive(Debug)]
pub enum PipelineError {
    Classifier(ClassifierError),
    Store(StoreError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Classifier(err) => write!(f, "classification failure: {err}"),
            PipelineError::Store(err) => write!(f, "vector store failure: {err}"),
        }
    }
}

impl Error for PipelineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            PipelineError::Classifier(err) => Some(err),
            PipelineError::Store(err) => Some(err),
        }
    }
}

impl From<ClassifierError> for PipelineError {
    fn from(value: ClassifierError) -> Self {
        PipelineError::Classifier(value)
    }
}

impl From<StoreError> for PipelineError {
    fn from(value: StoreError) -> Self {
        PipelineError::Store(value)
    }
}

/// Classify one ticket.
pub async fn classify_record(
    classifier: &TicketClassifier,
    ticket: &Ticket,
) -> Result<Classification, PipelineError> {
    Ok(classifier.classify(ticket).await?)
}

/// Classify one ticket and upsert its vector.
///
/// Storage is an enhancement, not a prerequisite: a failed upsert is logged
/// and the classification still reaches the caller.
pub async fn classify_and_store(
    classifier: &TicketClassifier,
    store: &VectorStore,
    ticket: &Ticket,
) -> Result<TicketWithClassification, PipelineError> {
    let classification = classifier.classify(ticket).await?;

    let stored = store
        .add_ticket(
            &ticket.id,
            &ticket.subject,
            &ticket.description,
            &classification,
        )
        .await;
    if !stored {
        tracing::warn!(ticket_id = %ticket.id, "ticket vector not stored");
    }

    Ok(TicketWithClassification {
        ticket: ticket.clone(),
        classification,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pipeline_error_display_names_the_stage() {
        let err = PipelineError::from(ClassifierError::MissingApiKey);
        assert!(err.to_string().starts_with("classification failure"));

        let err = PipelineError::from(StoreError::Connection("refused".into()));
        assert!(err.to_string().starts_with("vector store failure"));
    }

    #[test]
    fn pipeline_error_exposes_source() {
        let err = PipelineError::from(ClassifierError::Parse("bad json".into()));
        assert!(err.source().unwrap().to_string().contains("bad json"));
    }
}
