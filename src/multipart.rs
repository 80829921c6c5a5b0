//! File-upload client.
//!
//! A sibling of [`crate::JsonClient`] for the one multipart endpoint.
//! It shares the redaction and reporting plumbing and the uniform failure,
//! but sends exactly once: an upload is not assumed safe to repeat
//! blindly, so there is no retry loop here.

use crate::headers::APPLICATION_JSON;
use crate::redact;
use crate::report::{report_message, Reporter, TracingReporter};
use crate::response::ApiResponse;
use crate::status;
use crate::{Config, Error, Result};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderValue};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Client for multipart POSTs against the files base URL.
pub struct MultipartClient {
    http_client: reqwest::Client,
    base_files_url: String,
    console_log: bool,
    reporter: Arc<dyn Reporter>,
}

impl MultipartClient {
    /// Creates a client from configuration, reporting through tracing.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_reporter(config, Arc::new(TracingReporter))
    }

    /// Creates a client with an explicit reporting sink.
    pub fn with_reporter(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        Url::parse(&config.base_files_url)?;
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_files_url: config.base_files_url.trim_end_matches('/').to_string(),
            console_log: config.console_log,
            reporter,
        })
    }

    /// POSTs named file parts and text parts to `endpoint`.
    ///
    /// The bearer comes from the per-call `file_token`, not the suite
    /// configuration. The JSON content type set here is replaced by the
    /// multipart encoder when the body is attached.
    ///
    /// Returns the response body on a success status; raises
    /// [`Error::UnexpectedStatus`] otherwise.
    pub async fn post_multipart(
        &self,
        file_token: &str,
        file_parts: &[(&str, &Path)],
        text_parts: &[(&str, &str)],
        endpoint: &str,
    ) -> Result<String> {
        let url = Url::parse(&format!("{}{endpoint}", self.base_files_url))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {file_token}"))
                .map_err(|e| Error::Configuration(format!("Invalid file token: {e}")))?,
        );

        let mut form = Form::new();
        for (name, path) in file_parts {
            let bytes = tokio::fs::read(path).await?;
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| (*name).to_string());
            form = form.part((*name).to_string(), Part::bytes(bytes).file_name(file_name));
        }
        for (name, value) in text_parts {
            form = form.text((*name).to_string(), (*value).to_string());
        }

        let response = self
            .http_client
            .post(url)
            .headers(headers)
            .multipart(form)
            .send()
            .await?;
        let outcome = ApiResponse::new(
            response.status(),
            response.headers().clone(),
            response.text().await?,
        );

        if self.console_log {
            tracing::info!(endpoint, status = outcome.status.as_u16(), "multipart upload");
        }

        let title = format!("POST multipart {endpoint}");
        let message = report_message(
            &title,
            outcome.status,
            None,
            &redact::mask(&outcome.body),
        );
        if let Err(error) = self.reporter.record(&format!("HTTP: {title}"), &message) {
            tracing::debug!(%error, title, "report sink failed");
        }

        if !status::is_success(outcome.status) {
            return Err(Error::UnexpectedStatus {
                expected: status::success_set_label(),
                status: outcome.status,
                body: outcome.body,
                hint: None,
            });
        }
        Ok(outcome.body)
    }
}
