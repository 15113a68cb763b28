//! Webhook payload assembly.
//!
//! This module turns one log record into the JSON body posted to the chat
//! endpoint: the display envelope (channel, username, icons, parse flags)
//! plus a list of attachments derived from the record's metadata.
//!
//! # Metadata shapes
//!
//! Metadata drives the attachment layout:
//!
//! - **Error-like** (object with string `message` and `stack`): one
//!   attachment with an "Error message" field and a code-fenced
//!   "Stack Trace" field, markdown enabled for fields.
//! - **Map**: one attachment with a short field per key, values carried as
//!   unmodified JSON.
//! - **List**: a lead attachment for the record plus an `Index N` attachment
//!   per element.
//! - **Anything else**: a single bare attachment.

mod build;
mod metadata;


use serde::{Serialize, Serializer};

use crate::color::AttachmentColor;

pub(crate) use build::{build_payload, envelope};

/// JSON body of one webhook request.
#[derive(Clone, Debug, Serialize)]
pub struct MessagePayload {
    pub channel: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parse: Option<String>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "link_names_flag"
    )]
    pub link_names: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
    pub unfurl_links: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_emoji: Option<String>,
}

/// One Slack attachment.
#[derive(Clone, Debug, Serialize)]
pub struct Attachment {
    /// Plain-text summary shown by clients that cannot render attachments.
    pub fallback: String,
    pub text: String,
    pub color: AttachmentColor,
    /// Unix timestamp in whole seconds.
    pub ts: i64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<AttachmentField>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub mrkdwn_in: Vec<String>,
}

/// One titled entry inside an attachment.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AttachmentField {
    pub title: String,
    /// Carried as raw JSON so caller values survive unmodified.
    pub value: serde_json::Value,
    /// Short fields render two to a row; long ones get the full width.
    pub short: bool,
}

/// The chat API historically expected `link_names` as `0`/`1`.
fn link_names_flag<S>(value: &Option<bool>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(flag) => serializer.serialize_u8(u8::from(*flag)),
        None => serializer.serialize_none(),
    }
}
