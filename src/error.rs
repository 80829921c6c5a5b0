//! Error types for the suite.
//!
//! One enum covers the whole surface. The variant the tests care about is
//! [`Error::UnexpectedStatus`]: it is raised whenever a call's final status
//! falls outside the success set and carries everything needed to diagnose
//! the failure without re-running (expected set, actual status, body, and a
//! hint when the response looks like an HTML page instead of API JSON).

use http::StatusCode;

/// The error type for API calls and their surrounding plumbing.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A transport-level failure (connection refused, DNS, TLS, ...).
    ///
    /// These are not retried: the retry loop is driven purely by response
    /// status codes.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The final response status was not in the success set.
    #[error(
        "Bad request: expected status_code = {expected}, actual = {status}\nError message:\n{body}{}",
        hint_suffix(.hint)
    )]
    UnexpectedStatus {
        /// Rendered success set, e.g. `[200, 201, 202, 204, 205]`.
        expected: String,
        /// The status the backend actually returned.
        status: StatusCode,
        /// The response body, unmasked (masking applies to reports only).
        body: String,
        /// Set when the response content type or body looks like HTML,
        /// which usually means the base URL points at a web page.
        hint: Option<String>,
    },

    /// A response body could not be parsed as JSON.
    ///
    /// Raised at the point of parsing, never by the HTTP call itself:
    /// success/failure classification is status-code based and independent
    /// of body parseability.
    #[error("Invalid JSON provided: {reason}")]
    InvalidJson {
        /// The text that failed to parse.
        raw: String,
        /// The parser's complaint.
        reason: String,
    },

    /// A request body failed to serialize to JSON.
    #[error("Failed to serialize request: {0}")]
    Serialization(String),

    /// Invalid configuration (bad URL, malformed header, ...).
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The configured base URL does not parse.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// A local file could not be read (overlay config, multipart part).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!("\n{hint}"),
        None => String::new(),
    }
}

impl Error {
    /// The HTTP status attached to this error, if any.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw response text attached to this error, if any.
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Error::UnexpectedStatus { body, .. } => Some(body),
            Error::InvalidJson { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

/// A specialized `Result` for this crate.
pub type Result<T> = std::result::Result<T, Error>;
