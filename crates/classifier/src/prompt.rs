use model::Ticket;

/// System message pinning the reply format.
pub(crate) const SYSTEM_PROMPT: &str =
    "You are a technical support ticket classifier. Respond only with valid JSON.";

/// The three taxonomies are spelled out literal-for-literal so the model's
/// vocabulary matches the internal enums exactly; an answer outside these
/// lists fails validation rather than being coerced.
const TAXONOMY_BLOCK: &str = "\
**URGENCY LEVELS:**
- critical: System down, production blocker, revenue-impacting, immediate response needed
- high: Major functionality affected, multiple users impacted, workaround exists
- medium: Feature request, minor bug, single user affected, non-blocking
- low: General inquiry, documentation question, nice-to-have request

**INTENT TYPES:**
- bug_report: Technical malfunction or error
- feature_request: Request for new functionality
- account_issue: Account access, permissions, settings
- billing_inquiry: Payments, invoices, subscription issues
- how_to: How to use existing features, documentation questions
- integration: Third-party integrations, API connectivity
- performance: Slow response times, timeouts, latency issues
- security: Security concerns, vulnerabilities, compliance

**PRODUCT AREAS:**
- api: REST API, GraphQL, webhooks
- dashboard: Web interface, UI components
- mobile_app: iOS or Android applications
- integrations: Third-party integrations (Slack, Zapier, etc.)
- billing: Payment processing, invoices
- authentication: Login, SSO, OAuth
- analytics: Reports, data exports, metrics
- general: Multiple areas or unspecified";

const RESPONSE_FORMAT: &str = r#"Respond ONLY with valid JSON in this exact format:
{
  "urgency": "critical|high|medium|low",
  "intent": "bug_report|feature_request|account_issue|billing_inquiry|how_to|integration|performance|security",
  "product": "api|dashboard|mobile_app|integrations|billing|authentication|analytics|general",
  "confidence": 0.95,
  "reasoning": "Brief explanation of classification (1-2 sentences)"
}"#;

/// Render the deterministic classification prompt for one ticket.
pub(crate) fn classification_prompt(ticket: &Ticket) -> String {
    format!(
        "You are an expert customer support ticket classifier for a B2B SaaS platform.\n\n\
         Analyze the following support ticket and classify it according to these dimensions:\n\n\
         {TAXONOMY_BLOCK}\n\n\
         **TICKET:**\n\
         Subject: {subject}\n\
         Description: {description}\n\n\
         {RESPONSE_FORMAT}",
        subject = ticket.subject,
        description = ticket.description,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::{IntentType, ProductArea, UrgencyLevel};

    #[test]
    fn prompt_embeds_every_taxonomy_literal() {
        let prompt = classification_prompt(&Ticket::new("T-1", "s", "d"));

        for urgency in UrgencyLevel::ALL {
            assert!(prompt.contains(urgency.as_str()), "missing {urgency}");
        }
        for intent in IntentType::ALL {
            assert!(prompt.contains(intent.as_str()), "missing {intent}");
        }
        for product in ProductArea::ALL {
            assert!(prompt.contains(product.as_str()), "missing {product}");
        }
    }

    #[test]
    fn prompt_is_deterministic_per_ticket() {
        let ticket = Ticket::new("T-1", "Prod down", "500s everywhere");
        assert_eq!(
            classification_prompt(&ticket),
            classification_prompt(&ticket)
        );
    }

    #[test]
    fn prompt_interpolates_subject_and_description() {
        let ticket = Ticket::new("T-2", "CSV export missing", "Cannot find the export button");
        let prompt = classification_prompt(&ticket);
        assert!(prompt.contains("Subject: CSV export missing"));
        assert!(prompt.contains("Description: Cannot find the export button"));
    }
}
