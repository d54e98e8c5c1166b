//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual, expected,
        "Expected status {}, got {}: {}",
        expected,
        actual,
        response.text()
    );
}

/// Asserts that the response body is `{"detail": <expected>}`.
pub fn assert_detail(response: &TestResponse, expected: &str) {
    let body: Value = response.json();
    assert_eq!(body["detail"], expected, "Unexpected error body: {}", body);
}

/// Returns the ids of the books in a listing body, in order.
pub fn result_ids(body: &Value) -> Vec<i64> {
    body["results"]
        .as_array()
        .expect("results should be an array")
        .iter()
        .map(|b| b["id"].as_i64().expect("book id"))
        .collect()
}
