//! Forwarding error taxonomy.
//!
//! Two caller-visible failure classes: a missing/empty `url` parameter
//! (rejected before any outbound call) and everything that goes wrong
//! while building, sending, or reading the outbound exchange. The
//! second class is deliberately not split into finer kinds; nothing
//! downstream would treat them differently.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Errors produced by a single forward operation.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The `url` query parameter was absent or empty.
    #[error("the 'url' query parameter is required")]
    MissingTarget,

    /// The destination string could not be turned into a usable URI.
    #[error("invalid forward target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// The outbound request could not be built.
    #[error("failed to build outbound request: {0}")]
    BuildRequest(String),

    /// The outbound call failed (DNS, connect, transport, timeout).
    #[error("error reaching upstream: {0}")]
    Upstream(String),
}

impl ForwardError {
    /// HTTP status the original caller sees for this failure.
    pub fn status(&self) -> StatusCode {
        match self {
            ForwardError::MissingTarget => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Single response-construction path: the handler returns this error and
/// the framework serializes it. No direct response-stream writes exist,
/// so the dual-write ambiguity of the original cannot occur.
impl IntoResponse for ForwardError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}
