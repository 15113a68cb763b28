//! `{{ name }}` message templates.
//!
//! Templates are parsed once into a segment list and rendered per record, so
//! repeated `log` calls never re-scan the source string. Recognized names are
//! `message`, `level`, `meta`, and `meta.<key>`; anything else renders as the
//! empty string. An unterminated `{{` is kept as literal text.

use serde_json::Value;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed message template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MessageTemplate {
    segments: Vec<Segment>,
}

impl MessageTemplate {
    /// Parses the template source. Parsing never fails; malformed
    /// placeholders degrade to literal text.
    pub fn parse(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find("{{") {
            let (literal, tail) = rest.split_at(open);
            if !literal.is_empty() {
                segments.push(Segment::Literal(literal.to_string()));
            }
            let inner = &tail[2..];
            let Some(close) = inner.find("}}") else {
                segments.push(Segment::Literal(tail.to_string()));
                return Self { segments };
            };
            segments.push(Segment::Placeholder(inner[..close].trim().to_string()));
            rest = &inner[close + 2..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }
        Self { segments }
    }

    /// Renders the template against one record.
    pub fn render(&self, level: &str, message: &str, meta: Option<&Value>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => out.push_str(&resolve(name, level, message, meta)),
            }
        }
        out
    }
}

fn resolve(name: &str, level: &str, message: &str, meta: Option<&Value>) -> String {
    match name {
        "message" => message.to_string(),
        "level" => level.to_string(),
        "meta" => meta.map(render_value).unwrap_or_default(),
        _ => name
            .strip_prefix("meta.")
            .and_then(|key| meta?.get(key))
            .map(render_value)
            .unwrap_or_default(),
    }
}

/// Strings render bare; everything else renders as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
