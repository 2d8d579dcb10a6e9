use serde_json::json;

use super::*;

#[test]
fn endpoint_appends_model_path_to_base() {
    let settings = GeminiSettings::new(
        "https://generativelanguage.googleapis.com/v1beta",
        "mapx-test",
    )
    .unwrap();
    assert_eq!(
        settings.endpoint().as_str(),
        "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn endpoint_strips_extra_trailing_slashes() {
    let settings = GeminiSettings::new("http://localhost:8080//", "mapx-test").unwrap();
    assert_eq!(
        settings.endpoint().as_str(),
        "http://localhost:8080/models/gemini-2.5-flash:generateContent"
    );
}

#[test]
fn invalid_base_url_is_rejected() {
    let result = GeminiSettings::new("not a url", "mapx-test");
    assert!(matches!(result, Err(GeminiError::InvalidBaseUrl { .. })));
}

#[test]
fn api_error_message_reads_google_envelope() {
    let body = json!({
        "error": { "code": 400, "message": "API key not valid.", "status": "INVALID_ARGUMENT" }
    })
    .to_string();
    assert_eq!(api_error_message(&body).as_deref(), Some("API key not valid."));
}

#[test]
fn api_error_message_ignores_other_bodies() {
    assert!(api_error_message("<html>Bad Gateway</html>").is_none());
    assert!(api_error_message(&json!({ "error": {} }).to_string()).is_none());
}

#[test]
fn null_body_is_missing_response() {
    assert!(matches!(
        parse_response(serde_json::Value::Null),
        Err(GeminiError::MissingResponse)
    ));
    assert!(matches!(
        parse_response(json!([1, 2, 3])),
        Err(GeminiError::MissingResponse)
    ));
}

#[test]
fn wrongly_typed_candidates_is_deserialize_error() {
    let result = parse_response(json!({ "candidates": "nope" }));
    assert!(matches!(result, Err(GeminiError::Deserialize { .. })));
}
