//! Development server.
//!
//! The server binds first and answers with a loading page while the
//! background builder runs the first build, then serves the output
//! directory. With `watch` on, the builder keeps rebuilding on changes.

mod lifecycle;
mod path;
mod response;
mod watch;

use crate::{
    cli::build::build_loading_page,
    config::{SiteConfig, cfg},
    core::{is_serving, is_shutdown, last_build_error},
    embed::asset_urls,
    log,
};
use anyhow::{Context, Result};
use crossbeam::channel;
use std::sync::Arc;
use std::thread;
use tiny_http::{Request, Server};

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    shutdown_rx: channel::Receiver<()>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server() -> Result<BoundServer> {
    let config = cfg();
    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    lifecycle::register_server_for_shutdown(Arc::clone(&server), shutdown_tx);

    log!("serve"; "http://{}", addr);

    Ok(BoundServer {
        server,
        shutdown_rx,
    })
}

impl BoundServer {
    /// Start the builder thread and the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let config = cfg();
        let loading = Arc::new(loading_page(&config));

        let watch = config.serve.watch;
        let shutdown_rx = self.shutdown_rx;
        let builder = thread::Builder::new()
            .name("folio-builder".into())
            .spawn(move || watch::run_builder(watch, shutdown_rx))
            .context("failed to start builder thread")?;

        run_request_loop(&self.server, &loading)?;
        lifecycle::wait_for_shutdown(builder);
        Ok(())
    }
}

/// Bind, build and serve until Ctrl+C.
pub fn serve_site() -> Result<()> {
    bind_server()?.run()
}

/// Skeleton page shown until the first build lands.
fn loading_page(config: &SiteConfig) -> String {
    match build_loading_page(config, asset_urls(config)) {
        Ok(html) => html,
        Err(e) => {
            crate::debug!("serve"; "no skeleton page: {:#}", e);
            concat!(
                "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n",
                "<meta http-equiv=\"refresh\" content=\"1\">\n<title>Building…</title>\n",
                "</head>\n<body>\n<p>Building…</p>\n</body>\n</html>\n"
            )
            .to_string()
        }
    }
}

fn run_request_loop(server: &Server, loading: &Arc<String>) -> Result<()> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .context("failed to create request thread pool")?;

    for request in server.incoming_requests() {
        let config = cfg();
        let loading = Arc::clone(loading);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &config, &loading) {
                log!("serve"; "request error: {e}");
            }
        });
    }
    Ok(())
}

/// Handle a single HTTP request
fn handle_request(request: Request, config: &SiteConfig, loading: &str) -> Result<()> {
    if is_shutdown() {
        return response::respond_unavailable(request);
    }

    if !is_serving() {
        return match last_build_error() {
            Some(error) => response::respond_build_error(request, &error),
            None => response::respond_loading(request, loading),
        };
    }

    if let Some(path) = path::resolve_path(request.url(), &config.build.output) {
        return response::respond_file(request, &path);
    }

    response::respond_not_found(request, config)
}
