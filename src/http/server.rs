//! HTTP server setup and request dispatch.
//!
//! # Responsibilities
//! - Create the Axum router with the forward handler on every path
//! - Wire up middleware (request ID, tracing, CORS, optional timeout)
//! - Bind the server to a listener and serve until shutdown
//! - Map forwarding outcomes onto client-visible responses

use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::forward::{Forwarder, HyperTransport, OutboundTransport};
use crate::http::cors::cors_layer;
use crate::http::request::{MakeRequestUuid, X_REQUEST_ID};
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState<T> {
    pub forwarder: Forwarder<T>,
}

/// HTTP server for the forwarding proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        let state = AppState {
            forwarder: Forwarder::new(HyperTransport::new()),
        };
        let router = build_router(&config, state);
        Self { router }
    }

    /// Run the server, accepting connections on the given listener
    /// until the shutdown channel fires or Ctrl+C arrives.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown.recv() => {}
                    _ = tokio::signal::ctrl_c() => {}
                }
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Generic over the transport so tests can drive the full middleware
/// stack against a fake.
pub(crate) fn build_router<T: OutboundTransport>(
    config: &ProxyConfig,
    state: AppState<T>,
) -> Router {
    let mut router = Router::new()
        .route("/", any(forward_handler::<T>))
        .route("/{*path}", any(forward_handler::<T>))
        .with_state(state);

    // No timeout unless configured; the default contract waits on the
    // destination as long as the client does.
    if let Some(secs) = config.timeouts.request_secs {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(secs)));
    }

    // CORS sits outside the timeout so even timeout responses carry the
    // permissive headers.
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(X_REQUEST_ID, MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID))
            .layer(cors_layer()),
    )
}

/// Main forward handler: one forwarding operation per inbound request,
/// no state shared between operations.
async fn forward_handler<T: OutboundTransport>(
    State(state): State<AppState<T>>,
    request: Request<Body>,
) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    match state.forwarder.forward(request).await {
        Ok(response) => {
            let status = response.status();
            metrics::record_forward(&method, status.as_u16(), start);
            tracing::info!(
                request_id = %request_id,
                method = %method,
                status = %status,
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Forwarded request"
            );
            response
        }
        Err(err) => {
            let message = err.to_string();
            let response = err.into_response();
            metrics::record_forward(&method, response.status().as_u16(), start);
            tracing::warn!(
                request_id = %request_id,
                method = %method,
                status = %response.status(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %message,
                "Forward failed"
            );
            response
        }
    }
}
