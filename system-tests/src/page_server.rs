// system-tests/src/page_server.rs
// ============================================================================
// Module: Demo Page Server
// Description: Static file server for the Universal Search example page.
// Purpose: Serve the example page and its module bundle to a browser under test.
// Dependencies: axum, tokio, url
// ============================================================================

//! ## Overview
//! [`DemoPageServer`] serves a directory over HTTP on a loopback port from a
//! dedicated thread. Directory requests resolve to `index.html`; files are
//! served with a content type derived from their extension.
//! Invariants:
//! - Paths containing `..`, backslashes or NUL bytes are rejected with 404.
//! - A handle is only returned once the server thread is accepting.
//! - The server shuts down gracefully when the handle is dropped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::net::TcpListener as StdTcpListener;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::thread;

use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::Uri;
use axum::http::header;
use axum::response::IntoResponse;
use axum::response::Response;
use thiserror::Error;
use tokio::runtime::Builder;
use tokio::sync::oneshot;
use url::Url;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File served for directory requests.
pub const INDEX_FILE: &str = "index.html";

/// Directory of the bundled example page, relative to the crate root.
const BUNDLED_DEMO_DIR: &str = "fixtures/demo";

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Demo page server errors.
#[derive(Debug, Error)]
pub enum PageServerError {
    /// Root directory does not exist or has no index page.
    #[error("demo root {0} has no {INDEX_FILE}")]
    MissingRoot(PathBuf),
    /// Listener could not be bound or configured.
    #[error("demo server bind failed: {0}")]
    Bind(String),
    /// Server thread failed before it started accepting connections.
    #[error("demo server failed to start: {0}")]
    Startup(String),
    /// Page path could not be joined onto the base URL.
    #[error("invalid demo page url: {0}")]
    Url(String),
}

// ============================================================================
// SECTION: Server
// ============================================================================

/// Handle for a running demo page server.
pub struct DemoPageServer {
    /// Base URL with a trailing slash.
    base_url: Url,
    /// Directory being served.
    root: PathBuf,
    /// Graceful shutdown trigger.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
}

impl DemoPageServer {
    /// Serves `root` on a free loopback port.
    ///
    /// # Errors
    ///
    /// Returns [`PageServerError`] when the root is missing or binding fails.
    pub fn spawn(root: impl Into<PathBuf>) -> Result<Self, PageServerError> {
        Self::spawn_on("127.0.0.1:0", root)
    }

    /// Serves `root` on `bind`.
    ///
    /// # Errors
    ///
    /// Returns [`PageServerError`] when the root is missing or binding fails.
    pub fn spawn_on(bind: &str, root: impl Into<PathBuf>) -> Result<Self, PageServerError> {
        let root = root.into();
        if !root.join(INDEX_FILE).is_file() {
            return Err(PageServerError::MissingRoot(root));
        }
        let listener =
            StdTcpListener::bind(bind).map_err(|err| PageServerError::Bind(err.to_string()))?;
        listener.set_nonblocking(true).map_err(|err| PageServerError::Bind(err.to_string()))?;
        let addr = listener.local_addr().map_err(|err| PageServerError::Bind(err.to_string()))?;
        let base_url = Url::parse(&format!("http://{addr}/"))
            .map_err(|err| PageServerError::Url(err.to_string()))?;

        let app = Router::new().fallback(serve_file).with_state(Arc::new(root.clone()));
        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        let (ready_tx, ready_rx) = mpsc::channel();
        let join = thread::Builder::new()
            .name(format!("demo-page-server-{}", addr.port()))
            .spawn(move || {
                let runtime = match Builder::new_current_thread().enable_all().build() {
                    Ok(runtime) => runtime,
                    Err(err) => {
                        let _ = ready_tx.send(Err(format!("runtime: {err}")));
                        return;
                    }
                };
                runtime.block_on(async move {
                    let listener = match tokio::net::TcpListener::from_std(listener) {
                        Ok(listener) => listener,
                        Err(err) => {
                            let _ = ready_tx.send(Err(format!("listener: {err}")));
                            return;
                        }
                    };
                    let _ = ready_tx.send(Ok(()));
                    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                        let _ = shutdown_rx.await;
                    });
                    let _ = server.await;
                });
            })
            .map_err(|err| PageServerError::Bind(err.to_string()))?;

        if let Err(err) = await_startup(&ready_rx) {
            let _ = join.join();
            return Err(err);
        }

        Ok(Self {
            base_url,
            root,
            shutdown: Some(shutdown_tx),
            join: Some(join),
        })
    }

    /// Serves the example page bundled with this crate.
    ///
    /// # Errors
    ///
    /// Returns [`PageServerError`] when binding fails.
    pub fn spawn_bundled() -> Result<Self, PageServerError> {
        Self::spawn(bundled_demo_root())
    }

    /// Base URL, with a trailing slash.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves `path` against the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`PageServerError::Url`] when `path` cannot be joined.
    pub fn url(&self, path: &str) -> Result<Url, PageServerError> {
        self.base_url.join(path).map_err(|err| PageServerError::Url(err.to_string()))
    }

    /// URL of the example page.
    #[must_use]
    pub fn index_url(&self) -> Url {
        self.url(INDEX_FILE).unwrap_or_else(|_| self.base_url.clone())
    }

    /// Directory being served.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Drop for DemoPageServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Blocks until the server thread reports whether it is accepting.
fn await_startup(ready: &mpsc::Receiver<Result<(), String>>) -> Result<(), PageServerError> {
    match ready.recv() {
        Ok(Ok(())) => Ok(()),
        Ok(Err(message)) => Err(PageServerError::Startup(message)),
        Err(_) => Err(PageServerError::Startup("server thread exited before startup".to_string())),
    }
}

/// Directory of the example page shipped with this crate.
#[must_use]
pub fn bundled_demo_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(BUNDLED_DEMO_DIR)
}

// ============================================================================
// SECTION: Handlers
// ============================================================================

/// Serves the file addressed by the request path.
async fn serve_file(State(root): State<Arc<PathBuf>>, uri: Uri) -> Response {
    let Some(relative) = resolve_relative_path(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let path = root.join(&relative);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            ([(header::CONTENT_TYPE, content_type_for(&path))], bytes).into_response()
        }
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Maps a request path to a root-relative file path, rejecting traversal.
fn resolve_relative_path(request_path: &str) -> Option<PathBuf> {
    let trimmed = request_path.trim_start_matches('/');
    if trimmed.contains('\\') || trimmed.contains('\0') {
        return None;
    }
    let mut relative = PathBuf::new();
    for segment in trimmed.split('/').filter(|segment| !segment.is_empty()) {
        if segment == ".." || segment == "." {
            return None;
        }
        relative.push(segment);
    }
    if trimmed.is_empty() || trimmed.ends_with('/') {
        relative.push(INDEX_FILE);
    }
    Some(relative)
}

/// Content type for a served file.
fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("js" | "mjs") => "text/javascript; charset=utf-8",
        Some("css") => "text/css; charset=utf-8",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
