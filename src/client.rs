//! The JSON client: build, attempt loop, report, classify.
//!
//! One logical call walks a fixed state machine. **Build** resolves the
//! path template, composes headers, and serializes the optional body.
//! The **attempt loop** sends the request and, while the status is in the
//! retryable set and attempts remain, sleeps per the backoff schedule and
//! sends again; transport errors are never retried. **Report** hands a
//! masked record to the reporting sink regardless of outcome. **Classify**
//! returns the body for a success status and raises
//! [`Error::UnexpectedStatus`] otherwise.
//!
//! Calls are sequential: one attempt in flight at a time, suspension only
//! at the backoff sleep, no mid-attempt cancellation.

use crate::headers::{self, HeaderOverride, TEXT_HTML};
use crate::paths::ApiPath;
use crate::redact;
use crate::report::{report_message, Reporter, TracingReporter};
use crate::response::ApiResponse;
use crate::retry::Backoff;
use crate::status;
use crate::{Config, Error, Result};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, Method};
use serde::Serialize;
use std::sync::Arc;
use url::Url;

const HTML_HINT: &str = "Hint: response looks like HTML - check the configured base URL.";

/// Client for the JSON endpoints.
///
/// Holds no per-call state: each request builds its own header set and
/// attempt counter, so a single client can serve every step in a suite.
///
/// # Examples
///
/// ```no_run
/// use petstore_smoke::{ApiPath, Config, JsonClient};
///
/// # async fn example() -> petstore_smoke::Result<()> {
/// let config = Config::load()?;
/// let client = JsonClient::new(&config)?;
///
/// let body = client.get(None, ApiPath::PetId, &["42"]).await?;
/// println!("pet: {body}");
/// # Ok(())
/// # }
/// ```
pub struct JsonClient {
    http_client: reqwest::Client,
    base_url: String,
    accept_language: String,
    bearer_token: String,
    console_log: bool,
    backoff: Backoff,
    reporter: Arc<dyn Reporter>,
}

impl JsonClient {
    /// Creates a client from configuration, reporting through tracing.
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_reporter(config, Arc::new(TracingReporter))
    }

    /// Creates a client with an explicit reporting sink.
    ///
    /// # Errors
    ///
    /// Returns an error when the base URL does not parse or the HTTP
    /// transport cannot be constructed.
    pub fn with_reporter(config: &Config, reporter: Arc<dyn Reporter>) -> Result<Self> {
        // Validate the base URL once, up front.
        Url::parse(&config.base_api_url)?;
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| Error::Configuration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: config.base_api_url.trim_end_matches('/').to_string(),
            accept_language: config.accept_language.clone(),
            bearer_token: config.bearer_token.clone(),
            console_log: config.console_log,
            backoff: Backoff::standard(config.retry_max),
            reporter,
        })
    }

    /// Replaces the backoff schedule (tests want millisecond delays).
    pub fn with_backoff(mut self, backoff: Backoff) -> Self {
        self.backoff = backoff;
        self
    }

    /// GET returning the response body.
    pub async fn get(
        &self,
        overridden: Option<&HeaderOverride>,
        path: ApiPath,
        params: &[&str],
    ) -> Result<String> {
        self.send::<()>(Method::GET, overridden, None, path, &[], params)
            .await
    }

    /// GET carrying a JSON body (some backends accept it for filtering).
    pub async fn get_with_body<Req>(
        &self,
        overridden: Option<&HeaderOverride>,
        body: &Req,
        path: ApiPath,
        params: &[&str],
    ) -> Result<String>
    where
        Req: Serialize + ?Sized,
    {
        self.send(Method::GET, overridden, Some(body), path, &[], params)
            .await
    }

    /// GET with query parameters.
    pub async fn get_with_query(
        &self,
        overridden: Option<&HeaderOverride>,
        path: ApiPath,
        query: &[(&str, &str)],
        params: &[&str],
    ) -> Result<String> {
        self.send::<()>(Method::GET, overridden, None, path, query, params)
            .await
    }

    /// POST with a JSON body.
    pub async fn post<Req>(
        &self,
        overridden: Option<&HeaderOverride>,
        body: &Req,
        path: ApiPath,
        params: &[&str],
    ) -> Result<String>
    where
        Req: Serialize + ?Sized,
    {
        self.send(Method::POST, overridden, Some(body), path, &[], params)
            .await
    }

    /// PUT with a JSON body.
    pub async fn put<Req>(
        &self,
        overridden: Option<&HeaderOverride>,
        body: &Req,
        path: ApiPath,
        params: &[&str],
    ) -> Result<String>
    where
        Req: Serialize + ?Sized,
    {
        self.send(Method::PUT, overridden, Some(body), path, &[], params)
            .await
    }

    /// DELETE returning the response body.
    pub async fn delete(
        &self,
        overridden: Option<&HeaderOverride>,
        path: ApiPath,
        params: &[&str],
    ) -> Result<String> {
        self.send::<()>(Method::DELETE, overridden, None, path, &[], params)
            .await
    }

    /// Raw GET: single attempt, no retry, no success check.
    ///
    /// Negative flows use this to assert on an expected failure status
    /// (e.g. a 404) without tripping the uniform failure.
    pub async fn get_raw(
        &self,
        overridden: Option<&HeaderOverride>,
        path: ApiPath,
        query: &[(&str, &str)],
        params: &[&str],
    ) -> Result<ApiResponse> {
        self.send_raw(Method::GET, overridden, path, query, params)
            .await
    }

    /// Raw DELETE: single attempt, no retry, no success check.
    pub async fn delete_raw(
        &self,
        overridden: Option<&HeaderOverride>,
        path: ApiPath,
        params: &[&str],
    ) -> Result<ApiResponse> {
        self.send_raw(Method::DELETE, overridden, path, &[], params)
            .await
    }

    /// Dispatches one logical call through the full state machine.
    ///
    /// Every verb goes through here; the convenience methods above are
    /// thin wrappers. PATCH and OPTIONS are supported even though no
    /// current flow exercises them.
    pub async fn send<Req>(
        &self,
        method: Method,
        overridden: Option<&HeaderOverride>,
        body: Option<&Req>,
        path: ApiPath,
        query: &[(&str, &str)],
        params: &[&str],
    ) -> Result<String>
    where
        Req: Serialize + ?Sized,
    {
        let resolved = path.resolve(params);
        let url = self.request_url(&resolved, query)?;
        let headers = headers::compose(&self.accept_language, &self.bearer_token, overridden)?;
        let body_text = match body {
            Some(body) => Some(
                serde_json::to_string(body).map_err(|e| Error::Serialization(e.to_string()))?,
            ),
            None => None,
        };

        let max_retries = self.backoff.max_retries();
        let mut attempt: u32 = 0;

        let outcome = loop {
            attempt += 1;
            let outcome = self
                .execute(method.clone(), &url, &headers, body_text.as_deref())
                .await?;

            if self.console_log {
                tracing::info!(
                    method = %method,
                    endpoint = path.description(),
                    status = outcome.status.as_u16(),
                    attempt,
                    "request"
                );
            }

            if !status::is_retryable(outcome.status) || attempt > max_retries {
                break outcome;
            }

            match self.backoff.delay_for_attempt(attempt) {
                Some(delay) => {
                    tracing::warn!(
                        status = outcome.status.as_u16(),
                        delay_ms = delay.as_millis() as u64,
                        attempt,
                        "retrying transient status"
                    );
                    tokio::time::sleep(delay).await;
                }
                None => break outcome,
            }
        };

        let title = format!("{method} {resolved}");
        self.report(&title, body_text.as_deref(), &outcome);

        self.classify(outcome)
    }

    /// One HTTP attempt; transport failures surface as [`Error::Network`].
    async fn execute(
        &self,
        method: Method,
        url: &Url,
        headers: &HeaderMap,
        body_text: Option<&str>,
    ) -> Result<ApiResponse> {
        tracing::debug!(method = %method, url = %url, "executing HTTP request");

        let mut request = self
            .http_client
            .request(method, url.clone())
            .headers(headers.clone());
        if let Some(body) = body_text {
            request = request.body(body.to_string());
        }

        let response = request.send().await?;
        let status = response.status();
        let response_headers = response.headers().clone();
        let body = response.text().await?;

        Ok(ApiResponse::new(status, response_headers, body))
    }

    async fn send_raw(
        &self,
        method: Method,
        overridden: Option<&HeaderOverride>,
        path: ApiPath,
        query: &[(&str, &str)],
        params: &[&str],
    ) -> Result<ApiResponse> {
        let resolved = path.resolve(params);
        let url = self.request_url(&resolved, query)?;
        let headers = headers::compose(&self.accept_language, &self.bearer_token, overridden)?;

        let outcome = self.execute(method.clone(), &url, &headers, None).await?;

        if self.console_log {
            tracing::info!(
                method = %method,
                endpoint = path.description(),
                status = outcome.status.as_u16(),
                "raw request"
            );
        }

        self.report(&format!("RAW {method} {resolved}"), None, &outcome);
        Ok(outcome)
    }

    fn request_url(&self, resolved_path: &str, query: &[(&str, &str)]) -> Result<Url> {
        let mut url = Url::parse(&format!("{}{resolved_path}", self.base_url))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    /// Masks and records one call; sink failures never propagate.
    fn report(&self, title: &str, request_body: Option<&str>, outcome: &ApiResponse) {
        let masked_request = redact::mask_opt(request_body);
        let masked_response = redact::mask(&outcome.body);
        let message = report_message(
            title,
            outcome.status,
            masked_request.as_deref(),
            &masked_response,
        );
        if let Err(error) = self.reporter.record(&format!("HTTP: {title}"), &message) {
            tracing::debug!(%error, title, "report sink failed");
        }
    }

    fn classify(&self, outcome: ApiResponse) -> Result<String> {
        if status::is_success(outcome.status) {
            return Ok(outcome.body);
        }

        let content_type = outcome.header(CONTENT_TYPE.as_str()).unwrap_or("");
        let looks_like_html =
            content_type.contains(TEXT_HTML) || outcome.body.starts_with("<!DOCTYPE");

        Err(Error::UnexpectedStatus {
            expected: status::success_set_label(),
            status: outcome.status,
            body: outcome.body,
            hint: looks_like_html.then(|| HTML_HINT.to_string()),
        })
    }
}
