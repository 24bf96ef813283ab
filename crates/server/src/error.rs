use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

pub type ServerResult<T> = Result<T, ServerError>;

/// Server error types
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The process started without a completion API key; classification
    /// routes report unavailability instead of failing mid-request.
    #[error("classifier not initialized: set OPENAI_API_KEY to enable classification")]
    ClassifierUnavailable,

    #[error("bad request: {0}")]
    BadRequest(String),

    /// A per-request classification failure, always tagged with the ticket
    /// it belongs to.
    #[error("classification failed for ticket {ticket_id}: {source}")]
    Classification {
        ticket_id: String,
        #[source]
        source: classifier::ClassifierError,
    },

    #[error("classification queue is full, retry later")]
    QueueFull,

    #[error("internal server error: {0}")]
    Internal(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("not found")]
    NotFound,
}

/// API error response structure
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ServerError {
    /// Get HTTP status code for this error
    fn status_code(&self) -> StatusCode {
        match self {
            ServerError::ClassifierUnavailable | ServerError::QueueFull => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            ServerError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::Classification { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ServerError::NotFound => StatusCode::NOT_FOUND,
            ServerError::Internal(_) | ServerError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    fn error_code(&self) -> &'static str {
        match self {
            ServerError::ClassifierUnavailable => "CLASSIFIER_UNAVAILABLE",
            ServerError::BadRequest(_) => "BAD_REQUEST",
            ServerError::Classification { .. } => "CLASSIFICATION_FAILED",
            ServerError::QueueFull => "QUEUE_FULL",
            ServerError::Internal(_) => "INTERNAL_ERROR",
            ServerError::Config(_) => "CONFIG_ERROR",
            ServerError::NotFound => "NOT_FOUND",
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
            },
        });

        (status, body).into_response()
    }
}

impl From<std::net::AddrParseError> for ServerError {
    fn from(err: std::net::AddrParseError) -> Self {
        ServerError::Config(format!("invalid address: {err}"))
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(format!("IO error: {err}"))
    }
}

impl From<serde_json::Error> for ServerError {
    fn from(err: serde_json::Error) -> Self {
        ServerError::BadRequest(format!("JSON parse error: {err}"))
    }
}

impl From<anyhow::Error> for ServerError {
    fn from(err: anyhow::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}
