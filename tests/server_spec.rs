use axum::routing::get;
use axum::Router;

#[tokio::test]
async fn binding_port_zero_resolves_an_ephemeral_port() {
    let app = Router::new().route("/health", get(|| async { "ok" }));
    let (tx, rx) = tokio::sync::oneshot::channel();

    let handle = tokio::spawn(async move {
        webconsole::server::serve(app, "localhost", 0, move |addr| {
            let _ = tx.send(addr);
        })
        .await
    });

    let addr = rx.await.expect("server never reported its address");
    assert_ne!(addr.port(), 0);

    handle.abort();
}

#[tokio::test]
async fn serves_requests_after_the_hook_fires() {
    let app = Router::new().route("/health", get(|| async { "ok" }));
    let (tx, rx) = tokio::sync::oneshot::channel();

    let handle = tokio::spawn(async move {
        webconsole::server::serve(app, "localhost", 0, move |addr| {
            let _ = tx.send(addr);
        })
        .await
    });

    let addr = rx.await.expect("server never reported its address");
    let body = http_get(addr, "/health").await;
    assert_eq!(body, "ok");

    handle.abort();
}

/// Minimal HTTP/1.1 GET over a raw socket.
async fn http_get(addr: std::net::SocketAddr, path: &str) -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("Failed to connect");
    let request = format!("GET {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("Failed to write request");

    let mut response = Vec::new();
    stream
        .read_to_end(&mut response)
        .await
        .expect("Failed to read response");
    let response = String::from_utf8(response).expect("Response is not UTF-8");
    response
        .split("\r\n\r\n")
        .nth(1)
        .unwrap_or_default()
        .to_string()
}
