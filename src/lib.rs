//! CORS forwarding proxy library.
//!
//! A single-hop passthrough proxy: the destination base URL arrives in
//! the `url` query parameter, the inbound request is reissued against it
//! (path, remaining query, headers, and body preserved), and the
//! response is streamed back with permissive cross-origin headers.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::ProxyConfig;
pub use forward::{Forwarder, HyperTransport, OutboundTransport};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
