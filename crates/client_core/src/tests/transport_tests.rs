use super::*;
use serde_json::json;

fn api() -> ApiClient {
    ApiClient::new("http://localhost:8080/api").expect("client")
}

#[test]
fn success_body_passes_through_unchanged() {
    let value = normalize(StatusCode::OK, br#"{"items":[],"total":0}"#).expect("ok");
    assert_eq!(value, json!({"items": [], "total": 0}));
}

#[test]
fn created_status_counts_as_success() {
    let value = normalize(StatusCode::CREATED, br#"{"id":7}"#).expect("created");
    assert_eq!(value["id"], 7);
}

#[test]
fn empty_success_body_is_null() {
    assert_eq!(normalize(StatusCode::OK, b"").expect("empty"), Value::Null);
    assert_eq!(
        normalize(StatusCode::NO_CONTENT, b" \n").expect("blank"),
        Value::Null
    );
}

#[test]
fn garbage_success_body_is_a_decode_error() {
    let err = normalize(StatusCode::OK, b"<html>").expect_err("not json");
    assert!(matches!(err, ClientError::Decode(_)));
}

#[test]
fn failure_uses_backend_error_message() {
    let err = normalize(StatusCode::NOT_FOUND, br#"{"error":"not found"}"#).expect_err("404");
    assert_eq!(err.to_string(), "not found");
    assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    assert!(err.is_not_found());
}

#[test]
fn failure_without_error_field_falls_back_to_status() {
    let err = normalize(StatusCode::BAD_REQUEST, br#"{"message":"nope"}"#).expect_err("400");
    assert_eq!(err.to_string(), "HTTP 400");
}

#[test]
fn unparseable_failure_body_falls_back_to_status() {
    let err = normalize(StatusCode::INTERNAL_SERVER_ERROR, b"upstream exploded").expect_err("500");
    assert_eq!(err.to_string(), "HTTP 500");
    assert!(matches!(err, ClientError::Api { .. }));
}

#[test]
fn empty_failure_body_falls_back_to_status() {
    let err = normalize(StatusCode::BAD_GATEWAY, b"").expect_err("502");
    assert_eq!(err.to_string(), "HTTP 502");
}

#[test]
fn scalar_error_field_is_used_as_text() {
    let err = normalize(StatusCode::CONFLICT, br#"{"error":5}"#).expect_err("409");
    assert_eq!(err.to_string(), "5");
    let err = normalize(StatusCode::CONFLICT, br#"{"error":true}"#).expect_err("409");
    assert_eq!(err.to_string(), "true");
}

#[test]
fn falsy_or_structured_error_field_falls_back_to_status() {
    let err = normalize(StatusCode::CONFLICT, br#"{"error":""}"#).expect_err("409");
    assert_eq!(err.to_string(), "HTTP 409");
    let err = normalize(StatusCode::CONFLICT, br#"{"error":0}"#).expect_err("409");
    assert_eq!(err.to_string(), "HTTP 409");
    let err = normalize(StatusCode::CONFLICT, br#"{"error":null}"#).expect_err("409");
    assert_eq!(err.to_string(), "HTTP 409");
    let err = normalize(StatusCode::CONFLICT, br#"{"error":{"code":1}}"#).expect_err("409");
    assert_eq!(err.to_string(), "HTTP 409");
    let err = normalize(StatusCode::CONFLICT, br#"["error"]"#).expect_err("409");
    assert_eq!(err.to_string(), "HTTP 409");
}

#[test]
fn endpoint_appends_segments_to_base_path() {
    let url = api().endpoint(&["tasks", "42", "execute"], &[]);
    assert_eq!(url.as_str(), "http://localhost:8080/api/tasks/42/execute");
}

#[test]
fn endpoint_tolerates_trailing_slash_in_base() {
    let client = ApiClient::new("http://localhost:8080/api/").expect("client");
    let url = client.endpoint(&["servers"], &[]);
    assert_eq!(url.as_str(), "http://localhost:8080/api/servers");
}

#[test]
fn endpoint_without_query_has_no_question_mark() {
    let url = api().endpoint(&["logs"], &[]);
    assert_eq!(url.query(), None);
}

#[test]
fn endpoint_encodes_query_pairs_in_order() {
    let url = api().endpoint(
        &["servers"],
        &[("enabled", "true".to_string()), ("page", "2".to_string())],
    );
    assert_eq!(url.as_str(), "http://localhost:8080/api/servers?enabled=true&page=2");
}

#[test]
fn rejects_base_that_cannot_hold_a_path() {
    let err = ApiClient::new("mailto:ops@example.com").expect_err("unusable");
    assert!(matches!(err, ClientError::UnusableBase(_)));
    let err = ApiClient::new("not a url").expect_err("invalid");
    assert!(matches!(err, ClientError::BaseUrl(_)));
}
