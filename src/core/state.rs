//! Dev server state.
//!
//! - `SERVING`: the first build finished, real pages can be served
//! - `SHUTDOWN`: Ctrl+C received
//! - `LAST_ERROR`: message of the most recent failed build, if any

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;
use tiny_http::Server;

/// Site is ready to serve requests
/// - `false`: Show loading page
/// - `true`: Serve normally
static SERVING: AtomicBool = AtomicBool::new(false);

/// Shutdown has been requested (Ctrl+C received)
static SHUTDOWN: AtomicBool = AtomicBool::new(false);

/// Last build failure, shown instead of the loading page
static LAST_ERROR: Mutex<Option<String>> = Mutex::new(None);

/// HTTP server reference for graceful shutdown
static SERVER: OnceLock<Arc<Server>> = OnceLock::new();

/// Shutdown signal sender for the watcher thread
static SHUTDOWN_TX: OnceLock<crossbeam::channel::Sender<()>> = OnceLock::new();

// =============================================================================
// SERVING state
// =============================================================================

pub fn is_serving() -> bool {
    SERVING.load(Ordering::SeqCst)
}

/// Mark the site as ready to serve (call after the first successful build)
pub fn set_serving() {
    SERVING.store(true, Ordering::SeqCst);
}

// =============================================================================
// Build errors
// =============================================================================

pub fn set_build_error(message: impl Into<String>) {
    *LAST_ERROR.lock() = Some(message.into());
}

pub fn clear_build_error() {
    *LAST_ERROR.lock() = None;
}

pub fn last_build_error() -> Option<String> {
    LAST_ERROR.lock().clone()
}

// =============================================================================
// SHUTDOWN state
// =============================================================================

/// Setup the global Ctrl+C handler. Call once at program start
///
/// - Before `register_server()`: exit immediately
/// - After `register_server()`: unblock the server and stop the watcher
pub fn setup_shutdown_handler() -> anyhow::Result<()> {
    ctrlc::set_handler(|| {
        SHUTDOWN.store(true, Ordering::SeqCst);

        if let Some(tx) = SHUTDOWN_TX.get() {
            let _ = tx.send(());
        }

        if let Some(server) = SERVER.get() {
            crate::log!("serve"; "shutting down...");
            server.unblock();
        } else {
            std::process::exit(0);
        }
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Register the HTTP server for graceful shutdown
///
/// Call this after binding the server, before entering the request loop
pub fn register_server(server: Arc<Server>, shutdown_tx: crossbeam::channel::Sender<()>) {
    let _ = SERVER.set(server);
    let _ = SHUTDOWN_TX.set(shutdown_tx);
}

pub fn is_shutdown() -> bool {
    SHUTDOWN.load(Ordering::Relaxed)
}
