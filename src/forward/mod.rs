//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → target.rs (extract `url`, build destination string)
//!     → forwarder.rs (synthesize outbound request: method/headers/body)
//!     → transport.rs (execute over hyper, streaming both ways)
//!     → forwarder.rs (strip Content-Disposition, relay response)
//! ```
//!
//! # Design Decisions
//! - Validation happens before any outbound call; a missing `url` never
//!   touches the network
//! - The transport is a trait so the forwarder is testable with fakes
//! - One failure category for everything past validation; no retries

pub mod error;
pub mod forwarder;
pub mod target;
pub mod transport;

pub use error::ForwardError;
pub use forwarder::{Forwarder, OutboundTransport};
pub use transport::HyperTransport;
