//! Request envelope construction and shape-tolerant parsing of the backend's
//! search results into suggestions.

use serde::Serialize;
use serde_json::{Value, json};
use thiserror::Error;

const RESULT_LIMIT: u32 = 10;
const TITLE_FIELD: &str = "common.title";
const DISPLAY_URL_FIELD: &str = "displayurl";

const PLACEHOLDER_TEXT: &str = "🔧 Test Suggestion";
const PLACEHOLDER_QUERY: &str = "Test Suggestion";
const PLACEHOLDER_URL: &str = "https://en.wikipedia.org/wiki/Test";

#[derive(Debug, Serialize)]
pub struct SearchEnvelope {
    pub parameters: SearchParameters,
    #[serde(rename = "indexKey")]
    pub index_key: &'static str,
}

#[derive(Debug, Serialize)]
pub struct SearchParameters {
    #[serde(rename = "querySyntax")]
    pub query_syntax: &'static str,
    /// The nested query object, serialized to a string.
    pub query: String,
    pub limit: u32,
    pub attributes: Vec<RequestedAttribute>,
}

#[derive(Debug, Serialize)]
pub struct RequestedAttribute {
    pub name: &'static str,
}

impl SearchEnvelope {
    pub fn new(text: &str) -> SearchEnvelope {
        let query = json!({ "query": { "nlq": { "text": text } } }).to_string();
        SearchEnvelope {
            parameters: SearchParameters {
                query_syntax: "js",
                query,
                limit: RESULT_LIMIT,
                attributes: vec![
                    RequestedAttribute { name: TITLE_FIELD },
                    RequestedAttribute {
                        name: DISPLAY_URL_FIELD,
                    },
                ],
            },
            index_key: "multiplex",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    #[serde(rename = "Text")]
    pub text: String,
    #[serde(rename = "Attributes")]
    pub attributes: SuggestionAttributes,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionAttributes {
    pub url: String,
    pub query: String,
    #[serde(rename = "previewPaneUrl")]
    pub preview_pane_url: String,
}

impl Suggestion {
    pub fn placeholder() -> Suggestion {
        Suggestion {
            text: PLACEHOLDER_TEXT.to_string(),
            attributes: SuggestionAttributes {
                url: PLACEHOLDER_URL.to_string(),
                query: PLACEHOLDER_QUERY.to_string(),
                preview_pane_url: PLACEHOLDER_URL.to_string(),
            },
        }
    }

    /// The title doubles as the echoed query; url and preview share the
    /// absolute link.
    pub fn from_result(title: String, display_url: &str, base_url: &str) -> Suggestion {
        let url = format!("{base_url}{display_url}");
        Suggestion {
            attributes: SuggestionAttributes {
                url: url.clone(),
                query: title.clone(),
                preview_pane_url: url,
            },
            text: title,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemError {
    #[error("result item is not an object")]
    NotAnObject,
    #[error("no usable `common.title`")]
    MissingTitle,
    #[error("no usable `displayurl`")]
    MissingDisplayUrl,
}

type Strategy = fn(&Value) -> Option<&str>;

/// Tried in order, first hit wins.
const STRATEGIES: [Strategy; 3] = [raw_in_array, string_in_array, plain_string];

/// `[{"raw": "..."}, ...]`
fn raw_in_array(value: &Value) -> Option<&str> {
    value.as_array()?.first()?.get("raw")?.as_str()
}

/// `["...", ...]`
fn string_in_array(value: &Value) -> Option<&str> {
    value.as_array()?.first()?.as_str()
}

/// `"..."`
fn plain_string(value: &Value) -> Option<&str> {
    value.as_str()
}

/// Extracts a non-empty string from `field` of a result item, whichever of
/// the tolerated shapes it comes in.
pub fn extract_field<'a>(item: &'a Value, field: &str) -> Option<&'a str> {
    let value = item.get(field)?;
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(value))
        .filter(|s| !s.is_empty())
}

/// Returns `(title, display_url)` for one upstream result item.
pub fn extract_item(item: &Value) -> Result<(&str, &str), ItemError> {
    if !item.is_object() {
        return Err(ItemError::NotAnObject);
    }
    let title = extract_field(item, TITLE_FIELD).ok_or(ItemError::MissingTitle)?;
    let display_url = extract_field(item, DISPLAY_URL_FIELD).ok_or(ItemError::MissingDisplayUrl)?;
    Ok((title, display_url))
}

/// Turns the backend's search body into the suggestion list, placeholder
/// first. Anything unusable in the body just leaves fewer suggestions.
pub fn suggestions_from_body(body: &str, base_url: &str) -> Vec<Suggestion> {
    let mut suggestions = vec![Suggestion::placeholder()];

    let root: Value = match serde_json::from_str(body) {
        Ok(root) => root,
        Err(e) => {
            log::warn!("search response is not valid json: {e}");
            return suggestions;
        }
    };

    let Some(values) = root.get("values").and_then(Value::as_array) else {
        log::warn!("search response has no `values` array");
        return suggestions;
    };

    for (idx, item) in values.iter().enumerate() {
        match extract_item(item) {
            Ok((title, display_url)) => {
                suggestions.push(Suggestion::from_result(
                    title.to_string(),
                    display_url,
                    base_url,
                ));
            }
            Err(e) => {
                log::debug!("skipped result item {idx}: {e}");
            }
        }
    }

    suggestions
}
