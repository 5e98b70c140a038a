//! OS signal handling.
//!
//! Translates SIGTERM/SIGINT into the internal shutdown broadcast so
//! the serve loop drains connections instead of dying mid-forward.

use crate::lifecycle::shutdown::Shutdown;

/// Wait for a termination signal, then trigger shutdown.
pub async fn shutdown_on_signal(shutdown: &Shutdown) {
    #[cfg(unix)]
    {
        let mut sigterm = match tokio::signal::unix::signal(
            tokio::signal::unix::SignalKind::terminate(),
        ) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                return;
            }
        };

        tokio::select! {
            _ = tokio::signal::ctrl_c() => {}
            _ = sigterm.recv() => {}
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }

    tracing::info!("Termination signal received");
    shutdown.trigger();
}
