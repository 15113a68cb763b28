//! Classification of record metadata into attachment layouts.

use serde_json::{Map, Value};

/// The attachment layout a metadata value selects.
///
/// Error-like wins over plain maps; a map qualifies as error-like only when
/// both `message` and `stack` are present as strings.
#[derive(Debug)]
pub(crate) enum MetadataShape<'a> {
    Empty,
    ErrorLike { message: &'a str, stack: &'a str },
    Map(&'a Map<String, Value>),
    List(&'a [Value]),
}

pub(crate) fn classify(meta: Option<&Value>) -> MetadataShape<'_> {
    match meta {
        Some(Value::Object(map)) => classify_object(map),
        Some(Value::Array(items)) => MetadataShape::List(items),
        _ => MetadataShape::Empty,
    }
}

fn classify_object(map: &Map<String, Value>) -> MetadataShape<'_> {
    if let (Some(message), Some(stack)) = (string_entry(map, "message"), string_entry(map, "stack"))
    {
        return MetadataShape::ErrorLike { message, stack };
    }
    if map.is_empty() {
        MetadataShape::Empty
    } else {
        MetadataShape::Map(map)
    }
}

fn string_entry<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    map.get(key).and_then(Value::as_str)
}
