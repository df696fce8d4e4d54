//! Inbound request capture.
//!
//! The body stream of an axum request cannot be shared between concurrent
//! readers and is gone once the handler returns, so it is read to the end
//! here, before any forward task exists.

use std::net::SocketAddr;

use axum::{
    body::{Body, Bytes},
    http::{header::HOST, request::Parts, HeaderMap, HeaderValue, Method, Request, Uri},
};
use thiserror::Error;

/// Failure to read the inbound body. Nothing is forwarded for such a request.
#[derive(Debug, Error)]
#[error("failed to read inbound body (limit {limit} bytes): {source}")]
pub struct CaptureError {
    pub limit: usize,
    #[source]
    pub source: axum::Error,
}

/// A fully buffered inbound request, shared read-only by every forward task.
#[derive(Debug)]
pub struct InboundRequest {
    parts: Parts,
    body: Bytes,
    client_addr: SocketAddr,
}

impl InboundRequest {
    pub fn new(parts: Parts, body: Bytes, client_addr: SocketAddr) -> Self {
        Self {
            parts,
            body,
            client_addr,
        }
    }

    /// Read the whole body of `request` into memory, up to `limit` bytes.
    pub async fn capture(
        request: Request<Body>,
        client_addr: SocketAddr,
        limit: usize,
    ) -> Result<Self, CaptureError> {
        let (parts, body) = request.into_parts();
        let body = axum::body::to_bytes(body, limit)
            .await
            .map_err(|source| CaptureError { limit, source })?;

        Ok(Self::new(parts, body, client_addr))
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// The captured body. Cloning the returned `Bytes` is a reference count bump.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn client_addr(&self) -> SocketAddr {
        self.client_addr
    }

    /// The host the caller addressed: the `Host` header, or the URI authority
    /// for HTTP/2 requests that carry `:authority` instead.
    pub fn host(&self) -> Option<HeaderValue> {
        if let Some(host) = self.parts.headers.get(HOST) {
            return Some(host.clone());
        }
        self.parts
            .uri
            .authority()
            .and_then(|authority| HeaderValue::from_str(authority.as_str()).ok())
    }
}
