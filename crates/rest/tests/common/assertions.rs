//! HTTP response assertions.
//!
//! Provides assertion utilities for testing HTTP responses.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual,
        expected,
        "Expected status {}, got {}: {}",
        expected,
        actual,
        response.text()
    );
}

/// Asserts that the response has an ETag header.
pub fn assert_has_etag(response: &TestResponse) {
    assert!(
        response.headers().contains_key("etag"),
        "Expected ETag header"
    );
}

/// Asserts that the response has a Location header.
pub fn assert_has_location(response: &TestResponse) {
    assert!(
        response.headers().contains_key("location"),
        "Expected Location header"
    );
}

/// Returns a header value as a string.
pub fn header_str(response: &TestResponse, name: &str) -> String {
    response
        .headers()
        .get(name)
        .unwrap_or_else(|| panic!("Expected {} header", name))
        .to_str()
        .expect("Header is not a string")
        .to_string()
}

/// Asserts that the response is a problem details document with the given status.
pub fn assert_problem(response: &TestResponse, expected: u16) -> Value {
    assert_status(response, expected);
    assert_eq!(header_str(response, "content-type"), "application/problem+json");

    let body: Value = response.json();
    assert_eq!(body["status"], expected);
    body
}

/// Returns the `rel` values of a link array, in order.
pub fn rels(links: &Value) -> Vec<String> {
    links
        .as_array()
        .expect("links is not an array")
        .iter()
        .map(|link| link["rel"].as_str().unwrap_or_default().to_string())
        .collect()
}

/// Asserts that `first` appears before `second` in the raw body.
pub fn assert_key_order(body: &str, first: &str, second: &str) {
    let a = body.find(&format!("\"{first}\""));
    let b = body.find(&format!("\"{second}\""));
    assert!(
        matches!((a, b), (Some(a), Some(b)) if a < b),
        "Expected {} before {} in {}",
        first,
        second,
        body
    );
}

/// Returns the href of the link with the given relation.
pub fn href<'a>(links: &'a Value, rel: &str) -> &'a str {
    links
        .as_array()
        .expect("links is not an array")
        .iter()
        .find(|link| link["rel"] == rel)
        .and_then(|link| link["href"].as_str())
        .unwrap_or_else(|| panic!("No {} link", rel))
}

/// Returns the keys of a JSON object, sorted.
pub fn keys(object: &Value) -> Vec<String> {
    object
        .as_object()
        .expect("not an object")
        .keys()
        .cloned()
        .collect()
}
