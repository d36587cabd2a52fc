//! Static server for the generated JSON tree, mounted at `/data`.

use std::future::Future;
use std::path::Path;

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

pub fn router(data_dir: &Path) -> Router {
    Router::new()
        .nest_service("/data", ServeDir::new(data_dir))
        .layer(TraceLayer::new_for_http())
}

/// Serve `data_dir` on `listener` until `shutdown` resolves.
pub async fn serve_on(
    listener: TcpListener,
    data_dir: &Path,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr().context("Listener has no local address")?;
    info!(%addr, data_dir = %data_dir.display(), "Serving dataset under /data");

    axum::serve(listener, router(data_dir))
        .with_graceful_shutdown(shutdown)
        .await
        .context("Dataset server failed")
}

pub async fn serve(bind_addr: &str, data_dir: &Path) -> anyhow::Result<()> {
    let listener = TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("Failed to bind {bind_addr}"))?;
    serve_on(listener, data_dir, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
