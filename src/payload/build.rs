//! Record-to-payload assembly.

use chrono::Utc;
use serde_json::{Map, Value};

use crate::color::AttachmentColor;
use crate::config::TransportConfig;
use crate::template::MessageTemplate;

use super::metadata::{MetadataShape, classify};
use super::{Attachment, AttachmentField, MessagePayload};

/// Builds the display envelope with no attachments. Query and stream
/// requests send exactly this.
pub(crate) fn envelope(config: &TransportConfig) -> MessagePayload {
    MessagePayload {
        channel: config.channel.clone(),
        username: config.username.clone(),
        parse: config.parse.clone(),
        link_names: config.link_names,
        attachments: Vec::new(),
        unfurl_links: config.unfurl_links,
        icon_url: config.icon_url.clone(),
        icon_emoji: config.icon_emoji.clone(),
    }
}

/// Builds the full payload for one record.
pub(crate) fn build_payload(
    config: &TransportConfig,
    template: Option<&MessageTemplate>,
    level: &str,
    message: &str,
    meta: Option<&Value>,
) -> MessagePayload {
    let text = match template {
        Some(template) => template.render(level, message, meta),
        None => message.to_string(),
    };
    let color = AttachmentColor::from_level(level);
    let ts = Utc::now().timestamp();

    let mut payload = envelope(config);
    payload.attachments = build_attachments(&text, color, ts, meta);
    payload
}

fn build_attachments(
    text: &str,
    color: AttachmentColor,
    ts: i64,
    meta: Option<&Value>,
) -> Vec<Attachment> {
    match classify(meta) {
        MetadataShape::ErrorLike { message, stack } => {
            vec![error_attachment(text, color, ts, message, stack)]
        }
        MetadataShape::Map(map) => vec![map_attachment(text, color, ts, map)],
        MetadataShape::List(items) => list_attachments(text, color, ts, items),
        MetadataShape::Empty => vec![base_attachment(text, color, ts)],
    }
}

fn base_attachment(text: &str, color: AttachmentColor, ts: i64) -> Attachment {
    Attachment {
        fallback: text.to_string(),
        text: text.to_string(),
        color,
        ts,
        fields: Vec::new(),
        mrkdwn_in: Vec::new(),
    }
}

fn error_attachment(
    text: &str,
    color: AttachmentColor,
    ts: i64,
    message: &str,
    stack: &str,
) -> Attachment {
    let mut attachment = base_attachment(text, color, ts);
    attachment.fields = vec![
        AttachmentField {
            title: "Error message".to_string(),
            value: Value::String(message.to_string()),
            short: false,
        },
        AttachmentField {
            title: "Stack Trace".to_string(),
            value: Value::String(format!("```{stack}```")),
            short: false,
        },
    ];
    attachment.mrkdwn_in = vec!["fields".to_string()];
    attachment
}

fn map_attachment(
    text: &str,
    color: AttachmentColor,
    ts: i64,
    map: &Map<String, Value>,
) -> Attachment {
    let mut attachment = base_attachment(text, color, ts);
    attachment.fields = map
        .iter()
        .map(|(key, value)| AttachmentField {
            title: key.clone(),
            value: value.clone(),
            short: true,
        })
        .collect();
    attachment
}

/// One lead attachment for the record, then an `Index <i>` attachment per
/// element.
fn list_attachments(
    text: &str,
    color: AttachmentColor,
    ts: i64,
    items: &[Value],
) -> Vec<Attachment> {
    let mut attachments = Vec::with_capacity(items.len() + 1);
    attachments.push(base_attachment(text, color, ts));
    for (index, item) in items.iter().enumerate() {
        let mut attachment = base_attachment(&format!("Index {index}"), color, ts);
        attachment.fields = element_fields(item);
        attachments.push(attachment);
    }
    attachments
}

fn element_fields(item: &Value) -> Vec<AttachmentField> {
    match item {
        Value::Object(map) => map
            .iter()
            .map(|(key, value)| AttachmentField {
                title: key.clone(),
                value: value.clone(),
                short: false,
            })
            .collect(),
        other => vec![AttachmentField {
            title: String::new(),
            value: other.clone(),
            short: false,
        }],
    }
}
