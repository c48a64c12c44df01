// Server module entry point
// Listener creation, the accept loop, and graceful shutdown.

pub mod connection;
pub mod listener;
mod signal;

// Re-export commonly used types
pub use listener::create_reusable_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Run the accept loop until a shutdown signal arrives.
///
/// Each accepted connection is served in its own task; in-flight
/// connections finish on their own after the loop stops accepting.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    let shutdown = signal::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                println!("\n[Shutdown] Signal received, no longer accepting connections");
                break;
            }
        }
    }

    Ok(())
}
