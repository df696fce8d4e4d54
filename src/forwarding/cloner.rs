//! Per-target request cloning.
//!
//! # Responsibilities
//! - Resolve the outbound URL: target scheme and authority, inbound path and query
//! - Attach an independent body over the shared captured bytes
//! - Propagate `Host`, the forwarding chain and every other inbound header
//!
//! The target's own path is replaced, not prefixed, so a target may be a bare
//! `http://host:port`. The inbound path and query are carried over byte for
//! byte; only the scheme and authority come from the target.

use axum::http::uri::{Authority, PathAndQuery, Scheme};
use axum::{
    body::Body,
    http::{header::HOST, Request, Uri},
};

use crate::forwarding::{
    headers::{self, X_FORWARDED_FOR},
    inbound::InboundRequest,
    outcome::ForwardError,
    target::Target,
};

/// Build the outbound copy of `inbound` addressed to `target`.
pub fn clone_for_target(
    inbound: &InboundRequest,
    target: &Target,
) -> Result<Request<Body>, ForwardError> {
    let base = target.base_url()?;

    let mut uri_parts = axum::http::uri::Parts::default();
    uri_parts.scheme = Some(Scheme::HTTP);
    uri_parts.authority =
        Some(Authority::try_from(base.authority()).map_err(axum::http::Error::from)?);
    uri_parts.path_and_query = Some(
        inbound
            .uri()
            .path_and_query()
            .cloned()
            .unwrap_or_else(|| PathAndQuery::from_static("/")),
    );
    let uri = Uri::from_parts(uri_parts).map_err(axum::http::Error::from)?;

    let mut request = Request::builder()
        .method(inbound.method().clone())
        .uri(uri)
        .body(Body::from(inbound.body().clone()))?;

    let outbound = request.headers_mut();
    headers::copy_inbound(inbound.headers(), outbound);

    if let Some(host) = inbound.host() {
        outbound.insert(HOST, host);
    }

    let chain = headers::forwarded_for(inbound.headers(), inbound.client_addr().ip())
        .map_err(axum::http::Error::from)?;
    outbound.insert(X_FORWARDED_FOR.clone(), chain);

    Ok(request)
}
