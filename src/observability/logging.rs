//! Structured logging.
//!
//! Uses the tracing crate throughout. The level comes from the config
//! but `RUST_LOG` wins when set, so operators can raise verbosity
//! without touching the config file.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
pub fn init(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("cors_proxy={log_level},tower_http={log_level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
