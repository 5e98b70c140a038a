//! Destination URL construction.
//!
//! The outbound URL is built from three pieces of the inbound request:
//! the raw `url` query value (the target base), the inbound path
//! appended unmodified, and the remaining query pairs re-serialized as
//! `key=value` joined by `&`. Repeated keys keep one `key=value` pair
//! per occurrence, in the original order. Values are serialized in
//! their decoded form and are not re-escaped; the target itself is not
//! validated beyond being non-empty.

use axum::http::Uri;

use crate::forward::error::ForwardError;

/// Query key naming the forward destination.
pub const TARGET_PARAM: &str = "url";

/// Build the literal destination URL for an inbound request URI.
///
/// Fails with [`ForwardError::MissingTarget`] when the `url` parameter
/// is absent or its first occurrence is empty. No outbound activity
/// happens before this check.
pub fn build_destination(uri: &Uri) -> Result<String, ForwardError> {
    let query = uri.query().unwrap_or("");

    let mut target: Option<String> = None;
    let mut remaining = String::new();

    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        if key == TARGET_PARAM {
            // First occurrence wins; every occurrence is dropped from
            // the forwarded query.
            if target.is_none() {
                target = Some(value.into_owned());
            }
        } else {
            if !remaining.is_empty() {
                remaining.push('&');
            }
            remaining.push_str(&key);
            remaining.push('=');
            remaining.push_str(&value);
        }
    }

    let target = match target {
        Some(t) if !t.is_empty() => t,
        _ => return Err(ForwardError::MissingTarget),
    };

    let mut destination = target;
    destination.push_str(uri.path());
    if !remaining.is_empty() {
        destination.push('?');
        destination.push_str(&remaining);
    }

    Ok(destination)
}
