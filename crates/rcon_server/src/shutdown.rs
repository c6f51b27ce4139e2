//! Graceful shutdown handling
//!
//! This module provides cross-platform signal handling for graceful server
//! shutdown. It listens for termination signals and provides a clean way to
//! shut down the server.

use tokio::sync::oneshot;
use tracing::{error, info};

/// Set up a shutdown signal handler
///
/// Creates a signal handler that listens for termination signals and provides
/// a channel receiver that will be triggered when shutdown is requested.
///
/// # Platform Support
/// * Unix/Linux: Handles SIGINT (Ctrl+C) and SIGTERM signals
/// * Windows: Handles Ctrl+C events
///
/// # Returns
/// * `oneshot::Receiver<()>` - Receiver that will be triggered on shutdown signal
pub async fn setup_shutdown_handler() -> oneshot::Receiver<()> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let mut tx = Some(tx);

        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            let (mut sigint, mut sigterm) =
                match (signal(SignalKind::interrupt()), signal(SignalKind::terminate())) {
                    (Ok(i), Ok(t)) => (i, t),
                    _ => {
                        error!("Failed to install signal handlers");
                        return;
                    }
                };

            tokio::select! {
                _ = sigint.recv() => {
                    info!("SIGINT received - initiating graceful shutdown");
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM received - initiating graceful shutdown");
                }
            }
        }

        #[cfg(windows)]
        {
            use tokio::signal::windows::ctrl_c;

            let mut ctrl_c = match ctrl_c() {
                Ok(c) => c,
                Err(_) => {
                    error!("Failed to install Ctrl+C handler");
                    return;
                }
            };

            ctrl_c.recv().await;
            info!("Ctrl+C received - initiating graceful shutdown");
        }

        // Send shutdown signal if sender is still available
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{timeout, Duration};

    #[tokio::test]
    async fn test_shutdown_handler_creation() {
        let shutdown_rx = setup_shutdown_handler().await;

        // The receiver should be ready but not yet triggered
        let result = timeout(Duration::from_millis(10), shutdown_rx).await;
        assert!(result.is_err()); // Should timeout since no signal was sent
    }
}
