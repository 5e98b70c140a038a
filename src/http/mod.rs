//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, forward handler)
//!     → request.rs (request ID as early as possible)
//!     → [forward subsystem does the actual hop]
//!     → cors.rs (permissive headers on every response)
//!     → Send to client
//! ```

pub mod cors;
pub mod request;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
