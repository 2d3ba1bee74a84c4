//! JSON payload detection and rendering.
//!
//! Image generators commonly store their parameters as JSON inside a text
//! chunk. [`try_parse_json`] recognises such values, [`pretty`] reformats
//! them and [`render`] turns them into indented plain text.

use serde::Serialize;
use serde_json::Value;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::value::MetadataValue;

/// A parsed JSON tree. Object keys keep their parse order.
pub type ParsedJson = Value;

const INDENT: &str = "    ";

/// Parse a metadata value as JSON.
///
/// Only text values are considered. Anything that fails strict parsing
/// (syntax errors, trailing data) is simply not JSON.
pub fn try_parse_json(value: &MetadataValue) -> Option<ParsedJson> {
    let text = value.as_text()?;
    serde_json::from_str(text).ok()
}

/// Pretty-print with a 4-space indent, keys in parse order.
pub fn pretty(value: &ParsedJson) -> String {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT.as_bytes()));
    if let Err(e) = value.serialize(&mut ser) {
        log::debug!("Falling back to compact JSON: {e}");
        return value.to_string();
    }
    String::from_utf8_lossy(&buf).into_owned()
}

/// Render a JSON tree as indented, human-readable lines.
///
/// - scalars: `{indent}{value}`
/// - object members: `{indent}{key}: {value}`, or `{indent}{key}:` followed by
///   the nested container one level deeper
/// - array elements: `{indent}- Item {n}:` (1-based) followed by the element
///   one level deeper
///
/// An empty container renders as an empty string, so its parent's header is
/// followed by a blank line.
pub fn render(node: &ParsedJson, indent_level: usize) -> String {
    let indent = INDENT.repeat(indent_level);
    let mut lines = Vec::new();

    match node {
        Value::Object(map) => {
            for (key, value) in map {
                match value {
                    Value::Object(_) | Value::Array(_) => {
                        lines.push(format!("{indent}{key}:"));
                        lines.push(render(value, indent_level + 1));
                    }
                    scalar => lines.push(format!("{indent}{key}: {}", scalar_text(scalar))),
                }
            }
        }
        Value::Array(items) => {
            for (i, item) in items.iter().enumerate() {
                lines.push(format!("{indent}- Item {}:", i + 1));
                lines.push(render(item, indent_level + 1));
            }
        }
        scalar => lines.push(format!("{indent}{}", scalar_text(scalar))),
    }

    lines.join("\n")
}

/// Natural text of a scalar: strings unquoted, everything else as JSON spells it.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
