//! Transport configuration: endpoint selection, display options, timeouts.

use std::time::Duration;

use crate::error::BuildError;

pub const DEFAULT_CHANNEL: &str = "#general";
pub const DEFAULT_USERNAME: &str = "logger";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_STREAM_READ_TIMEOUT: Duration = Duration::from_secs(1);

/// Where webhook requests are sent.
///
/// Exactly one of the two forms is configured. A full webhook URL is used
/// verbatim; a team domain plus legacy token expands to the hosted
/// incoming-webhook path with the token carried as a query parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Webhook { url: String },
    Team { domain: String, token: String },
}

impl Endpoint {
    fn validate(&self) -> Result<(), BuildError> {
        match self {
            Self::Webhook { url } => {
                if url.trim().is_empty() {
                    return Err(BuildError::InvalidConfig(
                        "webhook_url must not be empty".to_string(),
                    ));
                }
            }
            Self::Team { domain, token } => {
                if domain.trim().is_empty() {
                    return Err(BuildError::InvalidConfig(
                        "domain must not be empty".to_string(),
                    ));
                }
                if token.trim().is_empty() {
                    return Err(BuildError::InvalidConfig(
                        "token must not be empty".to_string(),
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Username/password pair sent as an HTTP Basic `Authorization` header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BasicAuth {
    pub username: String,
    pub password: String,
}

impl BasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

/// Full configuration for a [`SlackTransport`](crate::SlackTransport).
///
/// `new` fills collector-conventional defaults; the builder is the usual way
/// to produce one of these.
#[derive(Clone, Debug)]
pub struct TransportConfig {
    pub endpoint: Endpoint,
    /// Channel the message posts to, e.g. `#general` or `@someone`.
    pub channel: String,
    /// Display name the message posts under.
    pub username: String,
    pub icon_url: Option<String>,
    pub icon_emoji: Option<String>,
    /// Slack-side message parsing mode (`full`, `none`, ...); sent verbatim.
    pub parse: Option<String>,
    pub link_names: Option<bool>,
    pub unfurl_links: bool,
    /// Optional `{{ name }}` template applied to the record message.
    pub message: Option<String>,
    /// When set, `log` acknowledges records without sending anything.
    pub silent: bool,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    /// Per-read timeout on streaming bodies; doubles as the shutdown poll
    /// interval for the reader thread.
    pub stream_read_timeout: Duration,
}

impl TransportConfig {
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            channel: DEFAULT_CHANNEL.to_string(),
            username: DEFAULT_USERNAME.to_string(),
            icon_url: None,
            icon_emoji: None,
            parse: None,
            link_names: None,
            unfurl_links: false,
            message: None,
            silent: false,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            stream_read_timeout: DEFAULT_STREAM_READ_TIMEOUT,
        }
    }

    pub fn validate(&self) -> Result<(), BuildError> {
        self.endpoint.validate()?;
        if self.channel.trim().is_empty() {
            return Err(BuildError::InvalidConfig(
                "channel must not be empty".to_string(),
            ));
        }
        if self.username.trim().is_empty() {
            return Err(BuildError::InvalidConfig(
                "username must not be empty".to_string(),
            ));
        }
        ensure_positive(self.connect_timeout, "connect_timeout")?;
        ensure_positive(self.request_timeout, "request_timeout")?;
        ensure_positive(self.stream_read_timeout, "stream_read_timeout")?;
        Ok(())
    }
}

fn ensure_positive(value: Duration, name: &str) -> Result<(), BuildError> {
    if value.is_zero() {
        return Err(BuildError::InvalidConfig(format!(
            "{name} must be greater than zero"
        )));
    }
    Ok(())
}
