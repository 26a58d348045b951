// system-tests/src/bin/universal_search_demo_server.rs
// ============================================================================
// Module: Universal Search Demo Server
// Description: Serves the example page for manual and external browser runs.
// Purpose: Expose the same page the smoke suite drives, until Ctrl-C.
// Dependencies: system-tests, tokio
// ============================================================================

//! Demo page server binary for system-tests.

use std::io::Write;

use system_tests::config::SystemTestConfig;
use system_tests::page_server::DemoPageServer;
use system_tests::page_server::bundled_demo_root;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = match SystemTestConfig::load() {
        Ok(config) => config,
        Err(err) => fail(&format!("config load failed: {err}")),
    };
    let root = config.demo_root.clone().unwrap_or_else(bundled_demo_root);
    let bind = config.http_bind.as_deref().unwrap_or("127.0.0.1:8080");
    let server = match DemoPageServer::spawn_on(bind, root) {
        Ok(server) => server,
        Err(err) => fail(&format!("start failed: {err}")),
    };
    let _ = writeln!(
        std::io::stderr(),
        "universal-search-demo-server: serving {} at {}",
        server.root().display(),
        server.index_url()
    );
    if let Err(err) = tokio::signal::ctrl_c().await {
        fail(&format!("signal wait failed: {err}"));
    }
    drop(server);
}

/// Reports a fatal error and exits non-zero.
#[allow(clippy::exit, reason = "Binary entry point reports fatal startup errors.")]
fn fail(message: &str) -> ! {
    let _ = writeln!(std::io::stderr(), "universal-search-demo-server: {message}");
    std::process::exit(1)
}
