//! Soft assertions: collect every mismatch, fail once at the end.

use crate::json;
use crate::response::ApiResponse;
use http::StatusCode;
use serde_json::Value;

/// Accumulates assertion failures instead of stopping at the first one.
///
/// Step methods create one per call, run their checks, and call
/// [`SoftAssert::finish`] last.
#[derive(Debug, Default)]
pub struct SoftAssert {
    failures: Vec<String>,
}

impl SoftAssert {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asserts a string field equals `expected`.
    pub fn check_str_eq(&mut self, node: &Value, field: &str, expected: &str, context: &str) {
        let actual = json::get_str(node, field);
        if actual != Some(expected) {
            self.failures.push(format!(
                "{context} -> '{field}' mismatch: expected {expected:?}, actual {actual:?}"
            ));
        }
    }

    /// Asserts an integer field equals `expected`.
    pub fn check_i64_eq(&mut self, node: &Value, field: &str, expected: i64, context: &str) {
        let actual = json::get_i64(node, field);
        if actual != Some(expected) {
            self.failures.push(format!(
                "{context} -> '{field}' mismatch: expected {expected}, actual {actual:?}"
            ));
        }
    }

    /// Petstore create/update/delete responses carry a `code` field; when
    /// present it must be 200.
    pub fn check_code_200_if_present(&mut self, node: &Value, context: &str) {
        if json::has(node, "code") {
            self.check_i64_eq(node, "code", 200, context);
        }
    }

    /// Asserts the raw response status.
    pub fn check_status(&mut self, response: &ApiResponse, expected: StatusCode, context: &str) {
        if response.status != expected {
            self.failures.push(format!(
                "{context} -> HTTP status mismatch: expected {expected}, actual {}",
                response.status
            ));
        }
    }

    /// Asserts an arbitrary condition with its own message.
    pub fn check_true(&mut self, condition: bool, message: impl Into<String>) {
        if !condition {
            self.failures.push(message.into());
        }
    }

    /// The collected failures, consuming the collector.
    pub fn into_failures(self) -> Vec<String> {
        self.failures
    }

    /// Ends the step's assertions.
    ///
    /// # Panics
    ///
    /// Panics with the full failure list when any check failed.
    pub fn finish(self) {
        if !self.failures.is_empty() {
            panic!("soft assertion failures:\n{}", self.failures.join("\n"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::HeaderMap;

    #[test]
    fn passing_checks_finish_quietly() {
        let node = serde_json::json!({"name": "Rex", "id": 42, "code": 200});
        let mut soft = SoftAssert::new();
        soft.check_str_eq(&node, "name", "Rex", "Pet");
        soft.check_i64_eq(&node, "id", 42, "Pet");
        soft.check_code_200_if_present(&node, "Pet");
        soft.finish();
    }

    #[test]
    fn failures_accumulate_instead_of_stopping() {
        let node = serde_json::json!({"name": "Rex", "id": 41});
        let mut soft = SoftAssert::new();
        soft.check_str_eq(&node, "name", "Bella", "Pet");
        soft.check_i64_eq(&node, "id", 42, "Pet");
        let failures = soft.into_failures();
        assert_eq!(failures.len(), 2);
        assert!(failures[0].contains("'name' mismatch"));
        assert!(failures[1].contains("'id' mismatch"));
    }

    #[test]
    fn missing_code_field_is_not_a_failure() {
        let node = serde_json::json!({"id": 1});
        let mut soft = SoftAssert::new();
        soft.check_code_200_if_present(&node, "Delete");
        assert!(soft.into_failures().is_empty());
    }

    #[test]
    fn status_mismatch_is_reported() {
        let response = ApiResponse::new(StatusCode::OK, HeaderMap::new(), String::new());
        let mut soft = SoftAssert::new();
        soft.check_status(&response, StatusCode::NOT_FOUND, "Get User (negative)");
        let failures = soft.into_failures();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("HTTP status mismatch"));
    }

    #[test]
    #[should_panic(expected = "soft assertion failures")]
    fn finish_panics_on_failure() {
        let mut soft = SoftAssert::new();
        soft.check_true(false, "always fails");
        soft.finish();
    }
}
