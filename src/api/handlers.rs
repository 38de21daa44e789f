use axum::extract::{Query, State};
use std::sync::Arc;

use crate::config::Config;
use crate::suggest::{SearchEnvelope, suggestions_from_body};
use crate::upstream::{RelayError, Upstream};

use super::models::SuggestResponse;

const QUERY_PARAM: &str = "qry";

/// First `qry` value that is not blank, trimmed.
pub fn query_text(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .filter(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.trim())
        .find(|value| !value.is_empty())
}

pub async fn suggest_handler(
    State(config): State<Arc<Config>>,
    Query(params): Query<Vec<(String, String)>>,
) -> SuggestResponse {
    let Some(query) = query_text(&params) else {
        return SuggestResponse::empty();
    };

    log::info!("received query: {query}");

    let upstream = match Upstream::new(
        &config.login_url,
        &config.search_url,
        config.upstream_timeout,
    ) {
        Ok(upstream) => upstream,
        Err(e) => {
            log::error!("could not build upstream client: {e:#}");
            return SuggestResponse::empty();
        }
    };

    let token = match upstream.authenticate(&config.credentials).await {
        Ok(token) => token,
        Err(e) => {
            log::warn!("authentication failed: {e}");
            return SuggestResponse::auth_failed();
        }
    };

    let body = match upstream.search(&token, &SearchEnvelope::new(query)).await {
        Ok(body) => body,
        Err(RelayError::UpstreamStatus(status)) => {
            log::warn!("search call returned {status}");
            return SuggestResponse::empty();
        }
        Err(e) => {
            log::warn!("search call failed: {e}");
            return SuggestResponse::empty();
        }
    };

    SuggestResponse::new(suggestions_from_body(&body, &config.public_base_url))
}
