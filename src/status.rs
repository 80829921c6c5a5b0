//! Status-code classification for the Petstore API conventions.
//!
//! Two disjoint tables drive the client's control flow: [`SUCCESS_CODES`]
//! marks a call as done, [`RETRYABLE_CODES`] marks it as worth another
//! attempt. A code in neither table is a plain failure.

use http::StatusCode;

/// Statuses this API treats as a successful outcome.
pub const SUCCESS_CODES: [u16; 5] = [200, 201, 202, 204, 205];

/// Transient contention signals worth retrying.
///
/// 404 is deliberately absent: the backend uses it as a stable "does not
/// exist" answer, and the raw request variants exist to assert on it.
pub const RETRYABLE_CODES: [u16; 5] = [409, 410, 429, 500, 502];

/// Returns `true` if `status` is in the success set.
pub fn is_success(status: StatusCode) -> bool {
    SUCCESS_CODES.contains(&status.as_u16())
}

/// Returns `true` if `status` is in the retryable set.
pub fn is_retryable(status: StatusCode) -> bool {
    RETRYABLE_CODES.contains(&status.as_u16())
}

/// Renders the success set for error messages, e.g. `[200, 201, 202, 204, 205]`.
pub fn success_set_label() -> String {
    format!("{SUCCESS_CODES:?}")
}
