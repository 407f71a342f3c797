//! Static file server for the built app.
//!
//! Serves `static/` (including the generated `pkg/`) with caching disabled so
//! a rebuilt wasm module is always picked up on reload.

use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use axum::Router;
use axum::http::{HeaderValue, StatusCode, header};
use axum::routing::get;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::error::CliError;
use crate::tasks::Paths;

/// Router serving `static_dir` at `/` plus `GET /healthz`.
pub fn router(static_dir: &Path) -> Router {
    let files = ServeDir::new(static_dir).append_index_html_on_directories(true);
    Router::new()
        .route("/healthz", get(healthz))
        .fallback_service(files)
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache, no-store, must-revalidate"),
        ))
        .layer(SetResponseHeaderLayer::overriding(header::PRAGMA, HeaderValue::from_static("no-cache")))
        .layer(SetResponseHeaderLayer::overriding(header::EXPIRES, HeaderValue::from_static("0")))
        .layer(TraceLayer::new_for_http())
}

/// Parse `host:port` into a socket address.
///
/// # Errors
///
/// `InvalidHost` if `host` is not an IP address.
pub fn socket_addr(host: &str, port: u16) -> Result<SocketAddr, CliError> {
    let ip: IpAddr = host
        .parse()
        .map_err(|source| CliError::InvalidHost { host: host.to_owned(), source })?;
    Ok(SocketAddr::from((ip, port)))
}

/// Serve until Ctrl-C.
///
/// # Errors
///
/// `StaticDirMissing`, `InvalidHost`, or `Io` if the port cannot be bound.
pub async fn serve(paths: &Paths, host: &str, port: u16) -> Result<(), CliError> {
    if !paths.static_dir.is_dir() {
        return Err(CliError::StaticDirMissing(paths.static_dir.clone()));
    }
    for missing in paths.missing_pkg_outputs() {
        tracing::warn!(path = %missing.display(), "wasm output not found; run `sketchpad build` first");
    }

    let addr = socket_addr(host, port)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let static_dir = paths.static_dir.display();
    tracing::info!(%addr, %static_dir, "sketchpad serving");
    if addr.ip().is_unspecified() {
        tracing::info!("open http://localhost:{port}");
    } else {
        tracing::info!("open http://{addr}");
    }

    axum::serve(listener, router(&paths.static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for ctrl-c; serving until killed");
        std::future::pending::<()>().await;
    }
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "server_test.rs"]
mod tests;
