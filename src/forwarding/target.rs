//! Replication targets.

use std::fmt;
use std::sync::Arc;

use url::Url;

use crate::forwarding::outcome::ForwardError;

/// One downstream server that receives a copy of every inbound request.
///
/// Kept as the raw operator-supplied string. Parsing happens per forward so
/// that a malformed target fails on its own without affecting its siblings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target(Arc<str>);

impl Target {
    pub fn new(raw: impl Into<Arc<str>>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the target as an absolute `http` base URL with a host.
    ///
    /// The forwarding client speaks plain HTTP only, so any other scheme is
    /// rejected here rather than failing later at connect time.
    pub fn base_url(&self) -> Result<Url, ForwardError> {
        let url = Url::parse(&self.0).map_err(|e| ForwardError::InvalidTarget(e.to_string()))?;

        if url.cannot_be_a_base() || url.host_str().is_none() {
            return Err(ForwardError::InvalidTarget(format!(
                "'{}' is not an absolute URL with a host",
                self.0
            )));
        }

        if url.scheme() != "http" {
            return Err(ForwardError::InvalidTarget(format!(
                "unsupported scheme '{}' in '{}': only http targets are forwarded",
                url.scheme(),
                self.0
            )));
        }

        Ok(url)
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for Target {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}
