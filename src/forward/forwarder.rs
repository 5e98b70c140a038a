//! The forwarding core.
//!
//! # Responsibilities
//! - Validate the `url` parameter before any outbound activity
//! - Synthesize the outbound request (URI, method, headers, body)
//! - Execute it through an [`OutboundTransport`]
//! - Relay the outbound response with `Content-Disposition` stripped
//!
//! # Design Decisions
//! - The transport is a trait seam so the whole operation is testable
//!   with a fake; the production implementation is hyper-based
//! - The relayed response carries the outbound body stream as-is, so
//!   large payloads are never buffered here

use std::future::Future;

use axum::body::Body;
use axum::http::{header, HeaderMap, Request, Response, Uri};

use crate::forward::error::ForwardError;
use crate::forward::target;

/// Capability to execute one outbound HTTP exchange.
///
/// Implementations must accept arbitrary methods, attach headers without
/// validation, and return the response with a streaming body.
pub trait OutboundTransport: Clone + Send + Sync + 'static {
    fn send(
        &self,
        request: Request<Body>,
    ) -> impl Future<Output = Result<Response<Body>, ForwardError>> + Send;
}

/// Stateless single-hop forwarder.
///
/// Holds only the transport; every forward operation is independent and
/// owns its request/response values for exactly one cycle.
#[derive(Clone)]
pub struct Forwarder<T> {
    transport: T,
}

impl<T: OutboundTransport> Forwarder<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Forward one inbound request to the destination named by its
    /// `url` query parameter and relay the response.
    pub async fn forward(
        &self,
        inbound: Request<Body>,
    ) -> Result<Response<Body>, ForwardError> {
        let (parts, body) = inbound.into_parts();

        // Fails before any outbound call when `url` is absent/empty.
        let destination = target::build_destination(&parts.uri)?;

        let uri: Uri = destination
            .parse()
            .map_err(|e: axum::http::uri::InvalidUri| ForwardError::InvalidTarget {
                target: destination.clone(),
                reason: e.to_string(),
            })?;

        // A body is attached only when a positive Content-Length is
        // declared; zero or absent means no body.
        let outbound_body = if declared_content_length(&parts.headers)
            .is_some_and(|len| len > 0)
        {
            body
        } else {
            Body::empty()
        };

        let mut outbound = Request::builder()
            .method(parts.method.clone())
            .uri(uri)
            .body(outbound_body)
            .map_err(|e| ForwardError::BuildRequest(e.to_string()))?;

        // Copy every inbound header except Host and Origin. Host would
        // conflict with the destination's identity; Origin would leak
        // the original cross-origin context. Content-Type travels here.
        for (name, value) in parts.headers.iter() {
            if name == header::HOST || name == header::ORIGIN {
                continue;
            }
            outbound.headers_mut().append(name.clone(), value.clone());
        }

        tracing::debug!(
            method = %parts.method,
            destination = %destination,
            "Issuing outbound request"
        );

        let response = self.transport.send(outbound).await?;

        // Strip Content-Disposition so a download disposition meant for
        // the destination context does not fire on the proxy response.
        let (mut parts, body) = response.into_parts();
        parts.headers.remove(header::CONTENT_DISPOSITION);

        Ok(Response::from_parts(parts, body))
    }
}

fn declared_content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}
