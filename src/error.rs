//! Errors raised by controller dispatch.
//!
//! Dispatch has exactly one error of its own, [`ActionNotFound`]. Everything
//! else that can fail during a dispatch cycle (handlers, hooks) is reported
//! through `anyhow::Error` untouched, so callers recover the not-found case
//! with `downcast_ref` and treat the rest as opaque.

use http::StatusCode;
use std::fmt;

/// The requested action is not declared by the controller.
///
/// Carries the lower-cased action name that failed to resolve. Maps to
/// `404 Not Found` when a caller translates it into an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionNotFound {
    action: String,
}

impl ActionNotFound {
    /// Create the error for an already normalized action name
    #[must_use]
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
        }
    }

    /// The action name that failed to resolve
    #[must_use]
    pub fn action(&self) -> &str {
        &self.action
    }

    /// HTTP status associated with this error
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        StatusCode::NOT_FOUND
    }

    /// Numeric status code (always 404)
    #[must_use]
    pub const fn code(&self) -> u16 {
        self.status().as_u16()
    }
}

impl fmt::Display for ActionNotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action \"{}\" does not exist", self.action)
    }
}

impl std::error::Error for ActionNotFound {}

/// Map a dispatch failure to the status a transport layer should answer with.
///
/// `404` for [`ActionNotFound`], `500` for anything raised by a handler or hook.
/// Dispatch itself never calls this; it exists for the caller that owns the
/// HTTP response.
#[must_use]
pub fn status_for(err: &anyhow::Error) -> StatusCode {
    match err.downcast_ref::<ActionNotFound>() {
        Some(not_found) => not_found.status(),
        None => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
