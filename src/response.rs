//! The normalized response the raw request variants hand back.

use crate::status;
use http::{HeaderMap, StatusCode};

/// Status, headers, and body text of one HTTP response.
///
/// Strict calls unwrap this internally and return only the body; the raw
/// variants ([`crate::JsonClient::get_raw`], [`crate::JsonClient::delete_raw`])
/// return it whole so negative tests can assert on an expected failure
/// status directly.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The response headers.
    pub headers: HeaderMap,
    /// The response body as text.
    pub body: String,
}

impl ApiResponse {
    /// Creates a response outcome.
    pub fn new(status: StatusCode, headers: HeaderMap, body: String) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// `true` if the status is in the suite's success set.
    pub fn is_success(&self) -> bool {
        status::is_success(self.status)
    }

    /// A header value by name, when present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}
