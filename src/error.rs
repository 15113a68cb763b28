//! Error types shared across the transport.

use thiserror::Error;

/// Errors raised while building a transport from configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// The supplied configuration is structurally invalid.
    #[error("invalid transport configuration: {0}")]
    InvalidConfig(String),
}

/// Errors raised by a single `log`, `query`, or `stream` operation.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an HTTP response.
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with something other than 200.
    #[error("unexpected status code {0}")]
    Status(u16),

    /// A response or stream line was not valid JSON.
    #[error("invalid JSON payload: {0}")]
    Parse(#[from] serde_json::Error),
}

impl TransportError {
    /// True for errors synthesized from a non-200 response.
    pub fn is_status(&self) -> bool {
        matches!(self, Self::Status(_))
    }
}
