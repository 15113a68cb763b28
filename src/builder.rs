//! Builder for [`SlackTransport`](crate::SlackTransport).
//!
//! Exposes endpoint selection (webhook URL, or team domain plus legacy
//! token), display options, the message template, and timeouts. `build`
//! validates that exactly one endpoint mode was supplied.

use std::time::Duration;

use crate::config::{Endpoint, TransportConfig};
use crate::error::BuildError;
use crate::transport::SlackTransport;

macro_rules! option_setter {
    ($(#[$meta:meta])* $fn_name:ident, $field:ident, $ty:ty) => {
        $(#[$meta])*
        pub fn $fn_name(mut self, value: $ty) -> Self {
            self.$field = Some(value);
            self
        }
    };
}

/// Fluent configuration for a transport.
#[derive(Clone, Debug, Default)]
pub struct SlackTransportBuilder {
    webhook_url: Option<String>,
    domain: Option<String>,
    token: Option<String>,
    channel: Option<String>,
    username: Option<String>,
    icon_url: Option<String>,
    icon_emoji: Option<String>,
    parse: Option<String>,
    link_names: Option<bool>,
    unfurl_links: Option<bool>,
    message: Option<String>,
    silent: Option<bool>,
    connect_timeout_ms: Option<u64>,
    request_timeout_ms: Option<u64>,
    stream_read_timeout_ms: Option<u64>,
}

impl SlackTransportBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Full incoming-webhook URL. Mutually exclusive with domain/token.
    pub fn with_webhook_url(mut self, url: impl Into<String>) -> Self {
        self.webhook_url = Some(url.into());
        self
    }

    /// Team domain for the hosted endpoint; pairs with the token.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    /// Legacy API token; pairs with the domain.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Channel the messages post to. Defaults to `#general`.
    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Display name the messages post under. Defaults to `logger`.
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn with_icon_url(mut self, icon_url: impl Into<String>) -> Self {
        self.icon_url = Some(icon_url.into());
        self
    }

    pub fn with_icon_emoji(mut self, icon_emoji: impl Into<String>) -> Self {
        self.icon_emoji = Some(icon_emoji.into());
        self
    }

    /// Slack-side message parsing mode, sent verbatim.
    pub fn with_parse(mut self, parse: impl Into<String>) -> Self {
        self.parse = Some(parse.into());
        self
    }

    /// `{{ name }}` template applied to outgoing record messages.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    option_setter!(
        #[doc = "Ask the endpoint to linkify channel and user names."]
        with_link_names,
        link_names,
        bool
    );
    option_setter!(
        #[doc = "Unfurl links in delivered messages."]
        with_unfurl_links,
        unfurl_links,
        bool
    );
    option_setter!(
        #[doc = "Acknowledge records without sending anything."]
        with_silent,
        silent,
        bool
    );
    option_setter!(
        #[doc = "Set the connect timeout in milliseconds."]
        with_connect_timeout_ms,
        connect_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the request timeout in milliseconds."]
        with_request_timeout_ms,
        request_timeout_ms,
        u64
    );
    option_setter!(
        #[doc = "Set the stream read poll timeout in milliseconds."]
        with_stream_read_timeout_ms,
        stream_read_timeout_ms,
        u64
    );

    fn endpoint(&self) -> Result<Endpoint, BuildError> {
        let team = match (&self.domain, &self.token) {
            (None, None) => None,
            (Some(domain), Some(token)) => Some(Endpoint::Team {
                domain: domain.clone(),
                token: token.clone(),
            }),
            (Some(_), None) => {
                return Err(BuildError::InvalidConfig(
                    "domain requires a token".to_string(),
                ));
            }
            (None, Some(_)) => {
                return Err(BuildError::InvalidConfig(
                    "token requires a domain".to_string(),
                ));
            }
        };
        match (&self.webhook_url, team) {
            (Some(_), Some(_)) => Err(BuildError::InvalidConfig(
                "configure either webhook_url or domain and token, not both".to_string(),
            )),
            (Some(url), None) => Ok(Endpoint::Webhook { url: url.clone() }),
            (None, Some(team)) => Ok(team),
            (None, None) => Err(BuildError::InvalidConfig(
                "an endpoint is required: set webhook_url or domain and token".to_string(),
            )),
        }
    }

    /// Resolves and validates the configuration without constructing a
    /// transport. Useful together with
    /// [`SlackTransport::with_client`](crate::SlackTransport::with_client).
    pub fn into_config(self) -> Result<TransportConfig, BuildError> {
        let mut config = TransportConfig::new(self.endpoint()?);
        if let Some(channel) = self.channel {
            config.channel = channel;
        }
        if let Some(username) = self.username {
            config.username = username;
        }
        config.icon_url = self.icon_url;
        config.icon_emoji = self.icon_emoji;
        config.parse = self.parse;
        config.link_names = self.link_names;
        if let Some(unfurl_links) = self.unfurl_links {
            config.unfurl_links = unfurl_links;
        }
        config.message = self.message;
        if let Some(silent) = self.silent {
            config.silent = silent;
        }
        if let Some(ms) = self.connect_timeout_ms {
            config.connect_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.request_timeout_ms {
            config.request_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = self.stream_read_timeout_ms {
            config.stream_read_timeout = Duration::from_millis(ms);
        }
        config.validate()?;
        Ok(config)
    }

    pub fn build(self) -> Result<SlackTransport, BuildError> {
        SlackTransport::with_config(self.into_config()?)
    }
}
