//! HTTP client seam.
//!
//! All wire traffic goes through the [`HttpClient`] trait so tests and
//! alternative transports can substitute the network. The production
//! implementation is [`UreqClient`].
//!
//! Status handling is deliberately split: `execute` hands back a response
//! for *any* HTTP status so the caller can apply its own policy, while a
//! failed connection surfaces as [`TransportError::Request`].

mod ureq_client;

use std::io::Read;

use crate::config::BasicAuth;
use crate::error::TransportError;

pub use ureq_client::UreqClient;

/// Reader over a streaming response body.
pub type BodyReader = Box<dyn Read + Send>;

/// A fully-specified outgoing request. Always POSTed as JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// Absolute URL, query string included.
    pub url: String,
    pub body: serde_json::Value,
    /// Basic credentials, sent as a base64 `Authorization` header.
    pub auth: Option<BasicAuth>,
}

/// Response to a request/response exchange.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: ResponseBody,
}

/// Body of a completed response.
///
/// `Text` is raw and still needs parsing; `Json` is used by clients that
/// decode eagerly. The facade treats both uniformly.
#[derive(Clone, Debug, PartialEq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Json(serde_json::Value),
}

/// Blocking HTTP operations used by the transport.
pub trait HttpClient: Send + Sync {
    /// Performs a request/response exchange. Returns `Ok` for any HTTP
    /// status; `Err` only when no response was produced at all.
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Opens a long-lived response body for incremental reading. Non-200
    /// responses fail here since there is no body worth reading.
    fn open_stream(&self, request: &HttpRequest) -> Result<BodyReader, TransportError>;
}

pub(crate) fn basic_authorization(auth: &BasicAuth) -> String {
    use base64::Engine;

    let credentials = format!("{}:{}", auth.username, auth.password);
    let encoded = base64::engine::general_purpose::STANDARD.encode(credentials);
    format!("Basic {encoded}")
}
