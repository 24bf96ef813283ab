use serde::{Deserialize, Serialize};

/// Runtime configuration for the completion call.
///
/// Temperature is pinned low so repeated classifications of the same ticket
/// land on the same categories, and the token cap stays short because the
/// reply is one JSON object plus a sentence or two of reasoning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    /// API key for the completion provider. Falls back to the
    /// `OPENAI_API_KEY` environment variable when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Chat-completion endpoint.
    pub api_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Completion token cap.
    pub max_tokens: u32,
    /// Overall per-request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_url: "https://api.openai.com/v1/chat/completions".into(),
            model: "gpt-4o-mini".into(),
            temperature: 0.3,
            max_tokens: 300,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}
