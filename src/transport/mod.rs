//! The transport facade.
//!
//! [`SlackTransport`] owns the validated configuration, the pre-parsed
//! message template, and the HTTP client. One instance serves all three
//! operations:
//!
//! - `log` delivers a record as a webhook POST.
//! - `query` asks the endpoint for stored records.
//! - `stream` opens a live NDJSON feed and hands back a session.
//!
//! Operations report through `Result`; a non-200 response always maps to
//! [`TransportError::Status`], taking precedence over anything the HTTP
//! layer had to say.


use std::fmt;
use std::sync::Arc;

use log::debug;
use serde_json::Value;

use crate::builder::SlackTransportBuilder;
use crate::client::{HttpClient, HttpResponse, ResponseBody, UreqClient};
use crate::config::TransportConfig;
use crate::dispatcher::{self, RequestSpec};
use crate::error::{BuildError, TransportError};
use crate::payload::{build_payload, envelope};
use crate::query::QueryOptions;
use crate::stream::{StreamOptions, StreamSession};
use crate::template::MessageTemplate;

pub struct SlackTransport {
    config: TransportConfig,
    template: Option<MessageTemplate>,
    client: Arc<dyn HttpClient>,
}

impl fmt::Debug for SlackTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlackTransport")
            .field("config", &self.config)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

impl SlackTransport {
    pub fn builder() -> SlackTransportBuilder {
        SlackTransportBuilder::new()
    }

    /// Builds a transport over the default blocking client.
    pub fn with_config(config: TransportConfig) -> Result<Self, BuildError> {
        config.validate()?;
        let client = Arc::new(UreqClient::from_config(&config));
        Ok(Self::assemble(config, client))
    }

    /// Builds a transport over a caller-supplied client.
    pub fn with_client(
        config: TransportConfig,
        client: Arc<dyn HttpClient>,
    ) -> Result<Self, BuildError> {
        config.validate()?;
        Ok(Self::assemble(config, client))
    }

    fn assemble(config: TransportConfig, client: Arc<dyn HttpClient>) -> Self {
        let template = config.message.as_deref().map(MessageTemplate::parse);
        Self {
            config,
            template,
            client,
        }
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Delivers one record.
    ///
    /// A silent transport acknowledges immediately without touching the
    /// network. `Ok(())` means the endpoint answered 200.
    pub fn log(
        &self,
        level: &str,
        message: &str,
        meta: Option<&Value>,
    ) -> Result<(), TransportError> {
        if self.config.silent {
            debug!("slack transport is silent; dropping record");
            return Ok(());
        }
        let payload = build_payload(&self.config, self.template.as_ref(), level, message, meta);
        let request = dispatcher::build_request(&self.config, RequestSpec::collect(payload))?;
        let response = self.client.execute(&request)?;
        ensure_ok(&response)
    }

    /// Asks the endpoint for stored records.
    ///
    /// Options are normalized to a complete window first. The response body
    /// is decoded to JSON; a body that fails to parse surfaces as
    /// [`TransportError::Parse`], an empty body as `Value::Null`.
    pub fn query(&self, options: &QueryOptions) -> Result<Value, TransportError> {
        let window = options.normalize();
        debug!(
            "slack transport querying {} to {} (limit {}, start {}, order {})",
            window.from,
            window.until,
            window.limit,
            window.start,
            window.order.as_str()
        );
        let request =
            dispatcher::build_request(&self.config, RequestSpec::query(envelope(&self.config)))?;
        let response = self.client.execute(&request)?;
        ensure_ok(&response)?;
        decode_body(response.body)
    }

    /// Opens a live stream of records.
    ///
    /// Returns immediately; connection setup happens on the reader thread
    /// and any failure arrives as the session's first event.
    pub fn stream(&self, options: StreamOptions) -> StreamSession {
        let options = options.normalized();
        let request = dispatcher::build_request(
            &self.config,
            RequestSpec::stream(envelope(&self.config), options.path, options.auth),
        );
        StreamSession::spawn(
            Arc::clone(&self.client),
            request,
            self.config.stream_read_timeout,
        )
    }
}

/// Status errors outrank everything else: any response that is not a plain
/// 200 fails the operation even when the HTTP layer reported no error.
fn ensure_ok(response: &HttpResponse) -> Result<(), TransportError> {
    if response.status != 200 {
        return Err(TransportError::Status(response.status));
    }
    Ok(())
}

fn decode_body(body: ResponseBody) -> Result<Value, TransportError> {
    match body {
        ResponseBody::Empty => Ok(Value::Null),
        ResponseBody::Json(value) => Ok(value),
        ResponseBody::Text(text) => Ok(serde_json::from_str(&text)?),
    }
}
