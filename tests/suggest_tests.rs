use serde_json::{Value, json};

use suggest_relay::api::handlers::query_text;
use suggest_relay::suggest::{
    ItemError, SearchEnvelope, Suggestion, extract_field, extract_item, suggestions_from_body,
};
use suggest_relay::upstream::SessionToken;

const BASE: &str = "https://relay.example.com";

fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn test_extract_field_shapes_agree() {
    let plain = json!({ "common.title": "Foo" });
    let strings = json!({ "common.title": ["Foo", "Bar"] });
    let raw = json!({ "common.title": [{ "raw": "Foo" }, { "raw": "Bar" }] });

    assert_eq!(extract_field(&plain, "common.title"), Some("Foo"));
    assert_eq!(extract_field(&strings, "common.title"), Some("Foo"));
    assert_eq!(extract_field(&raw, "common.title"), Some("Foo"));
}

#[test]
fn test_extract_field_rejects_unusable_shapes() {
    let cases = [
        json!({ "common.title": [] }),
        json!({ "common.title": [{ "text": "Foo" }] }),
        json!({ "common.title": [{ "raw": 42 }] }),
        json!({ "common.title": [7, "Foo"] }),
        json!({ "common.title": 12 }),
        json!({ "common.title": null }),
        json!({ "common.title": { "raw": "Foo" } }),
        json!({ "common.title": "" }),
        json!({ "common.title": [{ "raw": "" }] }),
        json!({ "title": "Foo" }),
    ];

    for case in cases {
        assert_eq!(extract_field(&case, "common.title"), None, "case: {case}");
    }
}

#[test]
fn test_extract_item() {
    let item = json!({ "common.title": [{ "raw": "Foo" }], "displayurl": ["/x/y"] });
    assert_eq!(extract_item(&item), Ok(("Foo", "/x/y")));

    assert_eq!(extract_item(&json!("Foo")), Err(ItemError::NotAnObject));
    assert_eq!(
        extract_item(&json!({ "displayurl": "/x/y" })),
        Err(ItemError::MissingTitle)
    );
    assert_eq!(
        extract_item(&json!({ "common.title": "Foo" })),
        Err(ItemError::MissingDisplayUrl)
    );
}

#[test]
fn test_suggestions_from_body_plain_strings() {
    let body = json!({
        "values": [{ "common.title": "Foo", "displayurl": "/x/y" }]
    })
    .to_string();

    let suggestions = suggestions_from_body(&body, BASE);

    assert_eq!(suggestions.len(), 2);
    assert_eq!(suggestions[0], Suggestion::placeholder());
    let foo = &suggestions[1];
    assert_eq!(foo.text, "Foo");
    assert_eq!(foo.attributes.url, "https://relay.example.com/x/y");
    assert_eq!(foo.attributes.query, "Foo");
    assert_eq!(foo.attributes.preview_pane_url, "https://relay.example.com/x/y");
}

#[test]
fn test_suggestions_skip_bad_items_keep_siblings() {
    let body = json!({
        "values": [
            { "common.title": "First", "displayurl": "/1" },
            { "common.title": "No url" },
            "not an object",
            { "common.title": [{ "raw": 5 }], "displayurl": "/bad" },
            { "common.title": [{ "raw": "Second" }], "displayurl": [{ "raw": "/2" }] },
            { "displayurl": "/orphan" },
            { "common.title": ["Third"], "displayurl": ["/3"] }
        ]
    })
    .to_string();

    let texts: Vec<String> = suggestions_from_body(&body, BASE)
        .into_iter()
        .map(|s| s.text)
        .collect();

    assert_eq!(texts, vec!["🔧 Test Suggestion", "First", "Second", "Third"]);
}

#[test]
fn test_suggestions_without_values_only_placeholder() {
    let bodies = [
        json!({}).to_string(),
        json!({ "values": null }).to_string(),
        json!({ "values": { "common.title": "Foo" } }).to_string(),
        json!([{ "common.title": "Foo", "displayurl": "/x" }]).to_string(),
        "not json at all".to_string(),
        String::new(),
    ];

    for body in bodies {
        assert_eq!(
            suggestions_from_body(&body, BASE),
            vec![Suggestion::placeholder()],
            "body: {body:?}"
        );
    }
}

#[test]
fn test_suggestion_json_property_names() {
    let value = serde_json::to_value(Suggestion::placeholder()).unwrap();
    assert_eq!(
        value,
        json!({
            "Text": "🔧 Test Suggestion",
            "Attributes": {
                "url": "https://en.wikipedia.org/wiki/Test",
                "query": "Test Suggestion",
                "previewPaneUrl": "https://en.wikipedia.org/wiki/Test"
            }
        })
    );
}

#[test]
fn test_search_envelope_shape() {
    let value = serde_json::to_value(SearchEnvelope::new("rust \"async\"")).unwrap();

    assert_eq!(value["indexKey"], "multiplex");
    assert_eq!(value["parameters"]["querySyntax"], "js");
    assert_eq!(value["parameters"]["limit"], 10);
    assert_eq!(
        value["parameters"]["attributes"],
        json!([{ "name": "common.title" }, { "name": "displayurl" }])
    );

    // The inner query travels as a string and must survive quoting.
    let inner: Value =
        serde_json::from_str(value["parameters"]["query"].as_str().unwrap()).unwrap();
    assert_eq!(inner, json!({ "query": { "nlq": { "text": "rust \"async\"" } } }));
}

#[test]
fn test_session_token_from_set_cookie() {
    let token = SessionToken::from_set_cookie("JSESSIONID=abc123; Path=/; HttpOnly").unwrap();
    assert_eq!(token.as_str(), "JSESSIONID=abc123");

    let token = SessionToken::from_set_cookie("JSESSIONID=abc123").unwrap();
    assert_eq!(token.as_str(), "JSESSIONID=abc123");

    assert!(SessionToken::from_set_cookie("").is_none());
    assert!(SessionToken::from_set_cookie("  ; Path=/").is_none());
    assert!(!format!("{token:?}").contains("abc123"));
}

#[test]
fn test_query_text() {
    assert_eq!(query_text(&params(&[("qry", "  foo bar ")])), Some("foo bar"));
    assert_eq!(query_text(&params(&[("qry", " "), ("qry", "second")])), Some("second"));
    assert_eq!(query_text(&params(&[("q", "foo")])), None);
    assert_eq!(query_text(&params(&[("qry", "\t\n")])), None);
    assert_eq!(query_text(&[]), None);
}
