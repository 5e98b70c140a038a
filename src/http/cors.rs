//! Cross-origin policy.
//!
//! The whole point of this proxy is to put permissive CORS headers in
//! front of destinations that lack them, so the policy is any origin,
//! any method, any header, no credentials. Applied process-wide at
//! router construction and never changed afterwards.

use tower_http::cors::{Any, CorsLayer};

/// Permissive CORS layer attached to every response, including the
/// 400/500 error paths.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
}
