//! Header composition for outgoing requests.
//!
//! Every call builds its header set from scratch: the two defaults, a
//! bearer token when one is configured, and at most one caller-supplied
//! override that is merged last and wins on collision.

use crate::{Error, Result};
use http::header::{ACCEPT_LANGUAGE, AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};

/// `application/json` media type.
pub const APPLICATION_JSON: &str = "application/json";
/// `multipart/form-data` media type.
pub const MULTIPART_FORM_DATA: &str = "multipart/form-data";
/// `text/html` media type, used to detect misrouted base URLs.
pub const TEXT_HTML: &str = "text/html";

/// A single caller-supplied header, validated at construction.
#[derive(Debug, Clone)]
pub struct HeaderOverride {
    name: HeaderName,
    value: HeaderValue,
}

impl HeaderOverride {
    /// Creates an override pair.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the name or value is not a
    /// valid HTTP header.
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let name = HeaderName::try_from(name.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header name: {e}")))?;
        let value = HeaderValue::try_from(value.as_ref())
            .map_err(|e| Error::Configuration(format!("Invalid header value: {e}")))?;
        Ok(Self { name, value })
    }

    /// The header name.
    pub fn name(&self) -> &HeaderName {
        &self.name
    }

    /// The header value.
    pub fn value(&self) -> &HeaderValue {
        &self.value
    }
}

/// Builds the effective header set for one request.
///
/// Always includes `Accept-Language` and `Content-Type: application/json`.
/// Adds `Authorization: Bearer <token>` iff `bearer_token` is non-blank
/// after trimming. The override, when present, is inserted last and
/// replaces any same-named default.
///
/// # Errors
///
/// Returns [`Error::Configuration`] if a configured value cannot be
/// encoded as a header value.
pub fn compose(
    accept_language: &str,
    bearer_token: &str,
    overridden: Option<&HeaderOverride>,
) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        ACCEPT_LANGUAGE,
        HeaderValue::from_str(accept_language)
            .map_err(|e| Error::Configuration(format!("Invalid Accept-Language: {e}")))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

    if !bearer_token.trim().is_empty() {
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {bearer_token}"))
                .map_err(|e| Error::Configuration(format!("Invalid bearer token: {e}")))?,
        );
    }

    if let Some(overridden) = overridden {
        headers.insert(overridden.name().clone(), overridden.value().clone());
    }

    Ok(headers)
}
