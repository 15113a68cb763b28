//! Log transport that forwards structured records to Slack incoming
//! webhooks.
//!
//! A [`SlackTransport`] drives three operations against one configured
//! endpoint:
//!
//! - [`log`](SlackTransport::log) posts a record as a webhook message, with
//!   attachments shaped by the record's metadata (error-like objects, maps,
//!   and arrays each render differently).
//! - [`query`](SlackTransport::query) asks the endpoint for stored records
//!   over a normalized time window.
//! - [`stream`](SlackTransport::stream) follows a live newline-delimited
//!   JSON feed on a background thread.
//!
//! The endpoint is either a full webhook URL or a team domain plus legacy
//! token; the builder enforces that exactly one form is configured.
//!
//! # Example
//!
//! ```no_run
//! use slack_transport::SlackTransport;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = SlackTransport::builder()
//!     .with_webhook_url("https://hooks.slack.com/services/T0/B0/XYZ")
//!     .with_channel("#alerts")
//!     .with_username("alarmbot")
//!     .build()?;
//!
//! transport.log("error", "disk full on web-1", None)?;
//! # Ok(())
//! # }
//! ```

mod builder;
mod client;
mod color;
mod config;
mod dispatcher;
mod error;
mod payload;
mod query;
mod stream;
mod template;
mod transport;

pub use builder::SlackTransportBuilder;
pub use client::{BodyReader, HttpClient, HttpRequest, HttpResponse, ResponseBody, UreqClient};
pub use color::AttachmentColor;
pub use config::{BasicAuth, Endpoint, TransportConfig};
pub use error::{BuildError, TransportError};
pub use payload::{Attachment, AttachmentField, MessagePayload};
pub use query::{DEFAULT_QUERY_LIMIT, NormalizedQuery, QueryOptions, SortOrder};
pub use stream::{StreamEvent, StreamOptions, StreamSession};
pub use template::MessageTemplate;
pub use transport::SlackTransport;
