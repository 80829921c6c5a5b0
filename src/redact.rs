//! Masking of sensitive substrings before anything reaches a log or report.

use regex::Regex;
use std::sync::LazyLock;

static BEARER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Bearer\s+[A-Za-z0-9._-]+").unwrap());

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"([\w.%+-])([\w.%+-]*)(@[^\s"']+)"#).unwrap());

/// Masks bearer tokens and email addresses in `text`.
///
/// `Bearer <token>` becomes `Bearer ****` (case-insensitive); an email
/// keeps its first local character and the domain, e.g.
/// `j***@example.com`. Applying the mask twice is a no-op.
pub fn mask(text: &str) -> String {
    let masked = BEARER.replace_all(text, "Bearer ****");
    EMAIL.replace_all(&masked, "${1}***${3}").into_owned()
}

/// [`mask`] lifted over optional text; `None` passes through.
pub fn mask_opt(text: Option<&str>) -> Option<String> {
    text.map(mask)
}
