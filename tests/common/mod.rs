//! Shared utilities for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, Method, Request, StatusCode, Uri},
    Router,
};
use request_replicator::{net, HttpServer, ReplicatorConfig, Shutdown};
use tokio::net::TcpListener;
use tokio::sync::mpsc;

/// What a mock backend saw.
#[derive(Debug)]
pub struct RecordedRequest {
    pub method: Method,
    pub uri: Uri,
    pub headers: HeaderMap,
    pub body: Bytes,
}

#[derive(Clone)]
struct Backend {
    status: StatusCode,
    delay: Duration,
    tx: mpsc::UnboundedSender<RecordedRequest>,
}

async fn record(State(backend): State<Backend>, request: Request<Body>) -> StatusCode {
    let (parts, body) = request.into_parts();
    let body = axum::body::to_bytes(body, usize::MAX).await.unwrap_or_default();
    let _ = backend.tx.send(RecordedRequest {
        method: parts.method,
        uri: parts.uri,
        headers: parts.headers,
        body,
    });
    tokio::time::sleep(backend.delay).await;
    backend.status
}

/// Start a backend on an ephemeral port that records every request it receives,
/// then answers `status` after `delay`.
pub async fn start_backend(
    status: StatusCode,
    delay: Duration,
) -> (SocketAddr, mpsc::UnboundedReceiver<RecordedRequest>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let app = Router::new()
        .fallback(record)
        .with_state(Backend { status, delay, tx });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (addr, rx)
}

/// Start a backend that answers 200 immediately.
pub async fn start_recording_backend() -> (SocketAddr, mpsc::UnboundedReceiver<RecordedRequest>) {
    start_backend(StatusCode::OK, Duration::ZERO).await
}

/// An address nothing listens on.
pub async fn unreachable_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Start the replicator on an ephemeral port.
pub async fn start_replicator(targets: Vec<String>) -> (SocketAddr, Shutdown) {
    let mut config = ReplicatorConfig {
        targets,
        ..Default::default()
    };
    config.listener.bind_address = "127.0.0.1:0".into();
    config.timeouts.forward_secs = 10;

    let listener = net::bind(&config.listener).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Wait up to five seconds for the next recorded request.
pub async fn next_request(rx: &mut mpsc::UnboundedReceiver<RecordedRequest>) -> RecordedRequest {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("backend saw no request in time")
        .expect("backend channel closed")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
