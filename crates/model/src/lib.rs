//! Shared value types passed between the classifier, the vector store
//! adapter, and the HTTP layer.
//!
//! Tickets and classifications are transient, request-scoped values. Nothing
//! here holds cross-request mutable state; the only persistence lives in the
//! externally owned vector collection.

mod taxonomy;

pub use taxonomy::{IntentType, ProductArea, UnknownLiteral, UrgencyLevel};

use serde::{Deserialize, Serialize};

/// A customer support ticket as submitted by the caller.
///
/// The id is caller-assigned and expected to be unique per logical ticket.
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    pub subject: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
}

impl Ticket {
    pub fn new(
        id: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            subject: subject.into(),
            description: description.into(),
            customer_email: None,
        }
    }

    /// True when there is nothing to classify: both subject and description
    /// are blank after trimming.
    pub fn is_empty(&self) -> bool {
        self.subject.trim().is_empty() && self.description.trim().is_empty()
    }
}

/// Result of classifying one ticket. Produced exclusively by the classifier
/// and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub urgency: UrgencyLevel,
    pub intent: IntentType,
    pub product: ProductArea,
    /// Model-reported confidence, always within `0.0..=1.0`.
    pub confidence: f64,
    /// One or two sentences explaining the categorization.
    pub reasoning: String,
}

/// A ticket paired with its classification. Pure output view; not persisted
/// by this core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketWithClassification {
    pub ticket: Ticket,
    pub classification: Classification,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticket_serde_with_optional_email() {
        let json = r#"{"id":"T-1","subject":"s","description":"d"}"#;
        let ticket: Ticket = serde_json::from_str(json).unwrap();
        assert_eq!(ticket.id, "T-1");
        assert!(ticket.customer_email.is_none());

        // Absent email stays absent on the wire.
        let out = serde_json::to_string(&ticket).unwrap();
        assert!(!out.contains("customer_email"));

        let with_email: Ticket = serde_json::from_str(
            r#"{"id":"T-2","subject":"s","description":"d","customer_email":"a@b.co"}"#,
        )
        .unwrap();
        assert_eq!(with_email.customer_email.as_deref(), Some("a@b.co"));
    }

    #[test]
    fn ticket_emptiness_ignores_whitespace() {
        assert!(Ticket::new("T-1", "  ", "\n\t").is_empty());
        assert!(!Ticket::new("T-2", "subject", "").is_empty());
        assert!(!Ticket::new("T-3", "", "description").is_empty());
    }

    #[test]
    fn classification_serde_round_trip() {
        let classification = Classification {
            urgency: UrgencyLevel::Critical,
            intent: IntentType::BugReport,
            product: ProductArea::Api,
            confidence: 0.95,
            reasoning: "Production outage across all endpoints.".into(),
        };

        let json = serde_json::to_string(&classification).unwrap();
        assert!(json.contains("\"critical\""));
        assert!(json.contains("\"bug_report\""));

        let parsed: Classification = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, classification);
    }

    #[test]
    fn ticket_with_classification_pairs_values() {
        let pair = TicketWithClassification {
            ticket: Ticket::new("T-9", "Login broken", "SSO fails"),
            classification: Classification {
                urgency: UrgencyLevel::High,
                intent: IntentType::BugReport,
                product: ProductArea::Authentication,
                confidence: 0.8,
                reasoning: "Auth failure affecting logins.".into(),
            },
        };

        let json = serde_json::to_value(&pair).unwrap();
        assert_eq!(json["ticket"]["id"], "T-9");
        assert_eq!(json["classification"]["product"], "authentication");
    }
}
