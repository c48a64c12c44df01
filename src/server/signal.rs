// Signal handling module
//
// Resolves when the process is asked to stop: SIGTERM or SIGINT (Ctrl+C)
// on Unix, Ctrl+C elsewhere.

/// Wait for a shutdown signal.
#[cfg(unix)]
pub async fn shutdown_signal() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {}
        _ = sigterm.recv() => {}
    }
}

/// Wait for a shutdown signal (Ctrl+C only).
#[cfg(not(unix))]
pub async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
