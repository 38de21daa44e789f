use axum::http::HeaderValue;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;

use crate::suggest::Suggestion;

const AUTH_FAILED: &str = "Auth failed";

/// Body of every `/suggest` response. Property names go out exactly as the
/// widget expects them.
#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    #[serde(rename = "Suggestions")]
    pub suggestions: Vec<Suggestion>,
    #[serde(rename = "Error", skip_serializing_if = "Option::is_none")]
    pub error: Option<&'static str>,
}

impl SuggestResponse {
    pub fn new(suggestions: Vec<Suggestion>) -> SuggestResponse {
        SuggestResponse {
            suggestions,
            error: None,
        }
    }

    pub fn empty() -> SuggestResponse {
        SuggestResponse::new(Vec::new())
    }

    pub fn auth_failed() -> SuggestResponse {
        SuggestResponse {
            suggestions: Vec::new(),
            error: Some(AUTH_FAILED),
        }
    }
}

impl IntoResponse for SuggestResponse {
    fn into_response(self) -> Response {
        (
            [(
                CONTENT_TYPE,
                HeaderValue::from_static("application/json; charset=utf-8"),
            )],
            Json(self),
        )
            .into_response()
    }
}
