//! Hyper-backed outbound transport.

use axum::body::Body;
use axum::http::{Request, Response};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::future::Future;

use crate::forward::error::ForwardError;
use crate::forward::forwarder::OutboundTransport;

/// Production transport over a pooled hyper client.
///
/// The pool is shared across requests; each forward operation still
/// owns its request/response exclusively. Plain-HTTP connector only.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Body>,
}

impl HyperTransport {
    pub fn new() -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self { client }
    }
}

impl Default for HyperTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl OutboundTransport for HyperTransport {
    fn send(
        &self,
        request: Request<Body>,
    ) -> impl Future<Output = Result<Response<Body>, ForwardError>> + Send {
        let client = self.client.clone();
        async move {
            let response = client
                .request(request)
                .await
                .map_err(|e| ForwardError::Upstream(error_chain(&e)))?;
            Ok(response.map(Body::new))
        }
    }
}

/// Flatten an error and its sources into one human-readable message,
/// so the 500 body names the actual cause (e.g. "connection refused")
/// rather than just the top-level wrapper.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
