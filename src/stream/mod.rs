//! Live record streaming over a long-lived HTTP response.
//!
//! `stream` opens one HTTP request whose body never ends under normal
//! operation; the endpoint writes one JSON record per newline-terminated
//! line. A background reader frames the bytes, parses each line, and hands
//! [`StreamEvent`]s to the session. Malformed lines are reported and
//! skipped; only connection failures end the stream.

mod session;
mod splitter;
mod worker;


use serde_json::{Map, Value};

use crate::config::BasicAuth;
use crate::error::TransportError;

pub use session::StreamSession;

/// One event observed on a stream.
#[derive(Debug)]
pub enum StreamEvent {
    /// A complete line that parsed as JSON.
    Record(Value),
    /// A connection failure, or a single line that failed to parse.
    Error(TransportError),
}

/// Options accepted by [`SlackTransport::stream`](crate::SlackTransport::stream).
#[derive(Clone, Debug, Default)]
pub struct StreamOptions {
    /// Extra path segment appended to the endpoint URL.
    pub path: Option<String>,
    /// Basic credentials for the streaming endpoint.
    pub auth: Option<BasicAuth>,
    /// Host-defined extras. `path` and `auth` entries found here are
    /// relocated into the typed fields and never reach the wire.
    pub params: Map<String, Value>,
}

impl StreamOptions {
    /// Moves recognized `params` entries into the typed fields. Typed values
    /// win over relocated ones; relocated keys are removed either way.
    pub(crate) fn normalized(mut self) -> Self {
        if let Some(value) = self.params.remove("path") {
            if self.path.is_none() {
                self.path = value.as_str().map(str::to_string);
            }
        }
        if let Some(value) = self.params.remove("auth") {
            if self.auth.is_none() {
                self.auth = parse_auth(&value);
            }
        }
        self
    }
}

/// Accepts `"user:pass"` strings and `{ username, password }` objects.
fn parse_auth(value: &Value) -> Option<BasicAuth> {
    match value {
        Value::String(raw) => raw
            .split_once(':')
            .map(|(user, pass)| BasicAuth::new(user, pass)),
        Value::Object(map) => {
            let username = map.get("username")?.as_str()?;
            let password = map.get("password")?.as_str()?;
            Some(BasicAuth::new(username, password))
        }
        _ => None,
    }
}
