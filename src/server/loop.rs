// Server loop module
// Accepts connections until shutdown is requested, then drains them

use hyper_util::server::graceful::GracefulShutdown;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::AppState;
use crate::logger;

/// Run the accept loop until `shutdown` is notified.
///
/// Must be driven inside a `LocalSet`: connections are served with
/// `spawn_local`. After shutdown the listener is closed, idle connections
/// are closed, and busy ones get up to `performance.shutdown_timeout`
/// seconds to finish. Returns the number still open when the loop gave up
/// waiting.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<AppState>,
    active_connections: Arc<AtomicUsize>,
    shutdown: Arc<Notify>,
) -> usize {
    let graceful = GracefulShutdown::new();

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections, &graceful);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => break,
        }
    }

    drop(listener);
    let deadline = Duration::from_secs(state.config.performance.shutdown_timeout);
    // Timing out only means some connections are still open; they are counted below
    let _ = tokio::time::timeout(deadline, graceful.shutdown()).await;

    let remaining = active_connections.load(Ordering::SeqCst);
    logger::log_shutdown_complete(remaining);
    remaining
}
