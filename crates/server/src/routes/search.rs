use crate::error::{ServerError, ServerResult};
use crate::state::AppState;
use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use model::UrgencyLevel;
use serde::Deserialize;
use serde_json::json;

/// Query parameters for similarity search
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: String,
    #[serde(default)]
    pub limit: Option<u64>,
    #[serde(default)]
    pub urgency: Option<String>,
}

/// Search for tickets similar to a free-text query.
///
/// The urgency filter must be one of the recognized literals; anything else
/// is a 400, not a silent no-filter search.
pub async fn search_tickets(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ServerResult<impl IntoResponse> {
    if params.query.trim().is_empty() {
        return Err(ServerError::BadRequest("query must not be empty".into()));
    }

    let urgency = params
        .urgency
        .as_deref()
        .map(|raw| {
            raw.parse::<UrgencyLevel>()
                .map_err(|err| ServerError::BadRequest(err.to_string()))
        })
        .transpose()?;

    let limit = params.limit.unwrap_or(state.config.search_limit);
    let results = state
        .store
        .search_similar_tickets(&params.query, limit, urgency)
        .await;

    Ok(Json(json!({
        "query": params.query,
        "count": results.len(),
        "results": results,
    })))
}

/// Vector collection statistics.
pub async fn collection_stats(State(state): State<AppState>) -> ServerResult<impl IntoResponse> {
    let stats = state.store.get_collection_stats().await;
    Ok(Json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_params_deserialize_with_defaults() {
        let params: SearchParams =
            serde_json::from_str(r#"{"query":"slack integration broken"}"#).unwrap();
        assert_eq!(params.query, "slack integration broken");
        assert!(params.limit.is_none());
        assert!(params.urgency.is_none());
    }

    #[test]
    fn urgency_literal_validation() {
        assert!("critical".parse::<UrgencyLevel>().is_ok());
        assert!("urgent".parse::<UrgencyLevel>().is_err());
    }
}
