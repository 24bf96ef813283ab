use thiserror::Error;

/// Errors surfaced by [`TicketClassifier`](crate::TicketClassifier).
#[derive(Debug, Error)]
pub enum ClassifierError {
    /// No API key in the config and none in the environment. Raised once at
    /// construction so requests can report "classifier not initialized"
    /// instead of failing deep inside a call.
    #[error("no API key configured: set OPENAI_API_KEY or provide one in ClassifierConfig")]
    MissingApiKey,
    /// Subject and description are both blank; there is nothing to classify.
    #[error("ticket {0} has an empty subject and description")]
    EmptyTicket(String),
    /// Transport-level or HTTP-level failure talking to the completion API.
    /// Not retried here; the caller may retry the whole step.
    #[error("completion API request failed: {0}")]
    Api(String),
    /// The model reply was not a single valid JSON object.
    #[error("model response is not valid JSON: {0}")]
    Parse(String),
    /// The reply parsed as JSON but a required field is missing, an enum
    /// literal is unrecognized, or the confidence is out of range.
    #[error("model response failed validation: {0}")]
    Validation(String),
}

impl From<model::UnknownLiteral> for ClassifierError {
    fn from(err: model::UnknownLiteral) -> Self {
        ClassifierError::Validation(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_name_the_cause() {
        assert!(ClassifierError::MissingApiKey
            .to_string()
            .contains("OPENAI_API_KEY"));
        assert!(ClassifierError::EmptyTicket("T-1".into())
            .to_string()
            .contains("T-1"));
        assert!(ClassifierError::Parse("unexpected token".into())
            .to_string()
            .contains("not valid JSON"));
    }

    #[test]
    fn unknown_literal_converts_to_validation() {
        let err: ClassifierError = "urgent"
            .parse::<model::UrgencyLevel>()
            .unwrap_err()
            .into();
        assert!(matches!(err, ClassifierError::Validation(_)));
        assert!(err.to_string().contains("urgent"));
    }
}
