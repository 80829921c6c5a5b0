//! Best-effort reporting of each HTTP call.
//!
//! Every call produces one human-readable record (title, status, masked
//! request, masked response) and hands it to a [`Reporter`]. Reporting is
//! strictly fire-and-forget: the clients discard any `record` error, so a
//! broken sink can never fail a test.

use http::StatusCode;
use std::io;
use std::sync::Mutex;

/// An observability sink for call records.
pub trait Reporter: Send + Sync {
    /// Records one call. Implementations should be cheap; callers ignore
    /// the returned error.
    fn record(&self, title: &str, message: &str) -> io::Result<()>;
}

/// Default sink: emits each record as a `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn record(&self, title: &str, message: &str) -> io::Result<()> {
        tracing::info!(target: "petstore_smoke::report", title, %message, "HTTP call");
        Ok(())
    }
}

/// Test sink that keeps every record in memory.
#[derive(Debug, Default)]
pub struct MemoryReporter {
    records: Mutex<Vec<(String, String)>>,
}

impl MemoryReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// All records seen so far, in order.
    pub fn records(&self) -> Vec<(String, String)> {
        self.records.lock().unwrap().clone()
    }
}

impl Reporter for MemoryReporter {
    fn record(&self, title: &str, message: &str) -> io::Result<()> {
        self.records
            .lock()
            .map_err(|_| io::Error::other("reporter mutex poisoned"))?
            .push((title.to_string(), message.to_string()));
        Ok(())
    }
}

/// Renders the record body for one call. Request and response text are
/// expected to be masked already.
pub fn report_message(
    title: &str,
    status: StatusCode,
    masked_request: Option<&str>,
    masked_response: &str,
) -> String {
    format!(
        "Title: {title}\nStatus: {}\nRequest: {}\nResponse: {masked_response}\n",
        status.as_u16(),
        masked_request.unwrap_or("(no body)"),
    )
}
