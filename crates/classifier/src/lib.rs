//! LLM-backed ticket classification.
//!
//! One chat-completion request per ticket: a deterministic prompt embeds the
//! three taxonomies, the model's entire reply is decoded as a single JSON
//! object, and each field is looked up against the corresponding enum. An
//! unrecognized literal fails the whole classification — a silently wrong
//! category is worse than a visible failure in a triage tool.

mod config;
mod error;
mod prompt;

pub use config::ClassifierConfig;
pub use error::ClassifierError;

use model::{Classification, IntentType, ProductArea, Ticket, UrgencyLevel};
use serde_json::{json, Value};
use std::time::Duration;

/// Support ticket classifier backed by a chat-completion API.
///
/// Holds a pooled HTTP client with explicit timeouts; carries no per-request
/// mutable state, so one instance is shared freely across requests.
#[derive(Debug)]
pub struct TicketClassifier {
    cfg: ClassifierConfig,
    api_key: String,
    http: reqwest::Client,
}

impl TicketClassifier {
    /// Build a classifier from config, falling back to the `OPENAI_API_KEY`
    /// environment variable for the key.
    ///
    /// Fails with [`ClassifierError::MissingApiKey`] when no key is available
    /// anywhere, so the process can degrade to "classification unavailable"
    /// instead of erroring per request.
    pub fn new(cfg: ClassifierConfig) -> Result<Self, ClassifierError> {
        let api_key = cfg
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|key| !key.is_empty())
            .ok_or(ClassifierError::MissingApiKey)?;

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))
            .build()
            .map_err(|e| ClassifierError::Api(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { cfg, api_key, http })
    }

    /// Classify one ticket.
    ///
    /// Exactly one outbound request; no retries here — transient API failures
    /// propagate as [`ClassifierError::Api`] and the caller decides whether
    /// to retry the whole step.
    pub async fn classify(&self, ticket: &Ticket) -> Result<Classification, ClassifierError> {
        if ticket.is_empty() {
            return Err(ClassifierError::EmptyTicket(ticket.id.clone()));
        }

        let body = json!({
            "model": self.cfg.model,
            "messages": [
                { "role": "system", "content": prompt::SYSTEM_PROMPT },
                { "role": "user", "content": prompt::classification_prompt(ticket) },
            ],
            "temperature": self.cfg.temperature,
            "max_tokens": self.cfg.max_tokens,
        });

        let response = self
            .http
            .post(&self.cfg.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ClassifierError::Api(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api(format!("HTTP {status}: {body}")));
        }

        let reply: Value = response
            .json()
            .await
            .map_err(|e| ClassifierError::Api(format!("invalid response body: {e}")))?;

        let content = reply["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| ClassifierError::Api("model response missing content".into()))?;

        let classification = parse_classification(content)?;
        tracing::debug!(
            ticket_id = %ticket.id,
            urgency = %classification.urgency,
            confidence = classification.confidence,
            "classified ticket"
        );
        Ok(classification)
    }

    /// Classify tickets sequentially, collecting each result or error
    /// independently. One ticket's failure never aborts the rest.
    pub async fn classify_batch(
        &self,
        tickets: &[Ticket],
    ) -> Vec<Result<Classification, ClassifierError>> {
        let mut results = Vec::with_capacity(tickets.len());
        for ticket in tickets {
            results.push(self.classify(ticket).await);
        }
        results
    }
}

/// Decode and validate a model reply.
///
/// The entire content must be one JSON object; each string field is then
/// resolved against its enum. Public so the parsing discipline is testable
/// against stubbed replies, independent of live model behavior.
pub fn parse_classification(content: &str) -> Result<Classification, ClassifierError> {
    let value: Value =
        serde_json::from_str(content).map_err(|e| ClassifierError::Parse(e.to_string()))?;

    let obj = value
        .as_object()
        .ok_or_else(|| ClassifierError::Parse("reply is not a JSON object".into()))?;

    let urgency: UrgencyLevel = require_str(obj, "urgency")?.parse()?;
    let intent: IntentType = require_str(obj, "intent")?.parse()?;
    let product: ProductArea = require_str(obj, "product")?.parse()?;

    let confidence = obj
        .get("confidence")
        .and_then(Value::as_f64)
        .ok_or_else(|| ClassifierError::Validation("missing numeric field `confidence`".into()))?;
    if !(0.0..=1.0).contains(&confidence) {
        return Err(ClassifierError::Validation(format!(
            "confidence {confidence} outside 0.0..=1.0"
        )));
    }

    let reasoning = require_str(obj, "reasoning")?.to_string();

    Ok(Classification {
        urgency,
        intent,
        product,
        confidence,
        reasoning,
    })
}

fn require_str<'a>(
    obj: &'a serde_json::Map<String, Value>,
    field: &str,
) -> Result<&'a str, ClassifierError> {
    obj.get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ClassifierError::Validation(format!("missing string field `{field}`")))
}
