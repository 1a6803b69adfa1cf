//! Web application assembly.
//!
//! Builds the axum router the console serves: the bootstrap page, the
//! worksheet endpoints, the live-event WebSocket, and the static blueprint
//! under `/rekall-webconsole/` with cache-disabling headers.

mod handlers;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::http::{header, HeaderValue};
use axum::routing::{get, post};
use axum::Router;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::WebConsoleError;
use crate::plugins::PluginDescriptor;
use crate::session::Session;
use crate::worksheet::Worksheet;

/// Shared configuration injected into the app, visible to every handler.
#[derive(Clone)]
pub struct AppConfig {
    pub session: Arc<Session>,
    pub worksheet: Worksheet,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub session: Arc<Session>,
    pub worksheet: Worksheet,
    pub plugins: Arc<Vec<PluginDescriptor>>,
    /// Cell-append notifications fanned out to live WebSocket subscribers.
    pub events: broadcast::Sender<String>,
}

/// Assemble the web application from an ordered plugin set and the shared
/// configuration, serving static assets out of `static_dir`.
///
/// Fails if two plugins claim the same cell content type.
pub fn create_app(
    plugins: Vec<PluginDescriptor>,
    config: AppConfig,
    static_dir: impl AsRef<Path>,
) -> Result<Router, WebConsoleError> {
    let mut seen = HashSet::new();
    for plugin in &plugins {
        if let Some(kind) = plugin.content_type {
            if !seen.insert(kind) {
                return Err(WebConsoleError::DuplicatePlugin(kind.to_string()));
            }
        }
    }

    let (events, _) = broadcast::channel(64);
    let state = AppState {
        session: config.session,
        worksheet: config.worksheet,
        plugins: Arc::new(plugins),
        events,
    };

    // The static blueprint. Every response under the prefix, hits and misses
    // alike, is stamped no-cache so the browser never serves a stale bundle.
    let static_files = ServiceBuilder::new()
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store"),
        ))
        .service(ServeDir::new(static_dir.as_ref()));

    Ok(Router::new()
        .route("/", get(handlers::index))
        .route("/worksheet", get(handlers::get_worksheet))
        .route("/worksheet/cells", post(handlers::append_cell))
        .route("/session", get(handlers::get_session))
        .route("/ws", get(handlers::live_events))
        .nest_service("/rekall-webconsole", static_files)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state))
}

/// Locate the prebuilt frontend assets.
///
/// Installed layouts ship the bundle next to the executable; failing that,
/// a `static/` directory under the working directory is used, and only then
/// the compile-time source tree (a development-machine path, useless on a
/// deployed host). In debug mode the source tree is always used so edited
/// assets show up on the next request (ServeDir reads from disk every time,
/// and the blueprint disables caching).
pub fn static_asset_dir(debug: bool) -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf));
    let cwd = std::env::current_dir().ok();
    resolve_static_dir(exe_dir.as_deref(), cwd.as_deref(), debug)
}

fn resolve_static_dir(exe_dir: Option<&Path>, cwd: Option<&Path>, debug: bool) -> PathBuf {
    let source_tree = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("static");
    if debug {
        return source_tree;
    }

    if let Some(dir) = exe_dir {
        let bundled = dir.join("webconsole").join("static");
        if bundled.is_dir() {
            return bundled;
        }
    }

    if let Some(dir) = cwd {
        let local = dir.join("static");
        if local.is_dir() {
            return local;
        }
    }

    source_tree
}
