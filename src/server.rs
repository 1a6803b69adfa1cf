//! The blocking server loop.

use std::net::SocketAddr;

use axum::Router;
use tokio::net::TcpListener;

/// Bind `(host, port)` and serve `app` until interrupted.
///
/// `on_bound` runs exactly once, after the listening socket is bound but
/// before the accept loop starts. Requesting port 0 asks the OS to pick an
/// ephemeral port, so the hook receives the resolved address, not the
/// requested one. It must not block for long; serving waits on it.
///
/// Bind failures propagate unhandled. There is no retry and no graceful
/// drain; the loop ends only when the process is interrupted.
pub async fn serve<F>(app: Router, host: &str, port: u16, on_bound: F) -> anyhow::Result<()>
where
    F: FnOnce(SocketAddr),
{
    let listener = TcpListener::bind((host, port)).await?;
    let addr = listener.local_addr()?;
    tracing::info!("Web console listening on http://{}", addr);

    on_bound(addr);

    axum::serve(listener, app).await?;
    Ok(())
}
