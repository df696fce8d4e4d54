//! Header propagation rules for replicated requests.
//!
//! # Responsibilities
//! - Copy inbound headers to each clone, every value, in order
//! - Extend the X-Forwarded-For chain with the caller's IP
//!
//! Headers the clone computes for itself are skipped during the copy:
//! `Host` is set from the inbound host, `X-Forwarded-For` carries the
//! extended chain as a single value, and the framing headers are derived by
//! the client from the buffered body.

use std::net::IpAddr;

use axum::http::{
    header::{CONTENT_LENGTH, HOST, TRANSFER_ENCODING},
    HeaderMap, HeaderName, HeaderValue,
};

pub static X_FORWARDED_FOR: HeaderName = HeaderName::from_static("x-forwarded-for");

fn is_computed(name: &HeaderName) -> bool {
    *name == HOST
        || *name == X_FORWARDED_FOR
        || *name == CONTENT_LENGTH
        || *name == TRANSFER_ENCODING
}

/// Append every inbound header value to `outbound`, except the computed ones.
pub fn copy_inbound(inbound: &HeaderMap, outbound: &mut HeaderMap) {
    for (name, value) in inbound {
        if is_computed(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
}

/// Build the X-Forwarded-For value: any prior chain joined with `", "`,
/// followed by `client_ip`.
pub fn forwarded_for(
    inbound: &HeaderMap,
    client_ip: IpAddr,
) -> Result<HeaderValue, axum::http::header::InvalidHeaderValue> {
    let mut chain = Vec::new();
    for prior in inbound.get_all(&X_FORWARDED_FOR) {
        chain.extend_from_slice(prior.as_bytes());
        chain.extend_from_slice(b", ");
    }
    chain.extend_from_slice(client_ip.to_string().as_bytes());

    HeaderValue::from_bytes(&chain)
}
