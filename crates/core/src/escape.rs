//! Escaping for JSON embedded inside inline `<script>` bodies.

use serde_json::Value;

use crate::error::{CoreError, Result, MAX_PAYLOAD_DEPTH};

/// Escapes the characters that can prematurely terminate a script context
/// or trip an HTML parser scanning for `</script>` or comment sequences.
///
/// Replacements are JSON unicode escapes, so the embedded text parses back
/// to the exact original value.
pub fn html_escape_json(json: &str) -> String {
    let mut out = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => out.push_str("\\u003c"),
            '>' => out.push_str("\\u003e"),
            '&' => out.push_str("\\u0026"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Serializes a hydration payload for embedding in an inline script.
///
/// A payload nested past [`MAX_PAYLOAD_DEPTH`] is reported with the page it
/// came from; any other serialization failure propagates unchanged.
pub fn inline_script_source(payload: &Value, page: &str) -> Result<String> {
    if depth_exceeds(payload, MAX_PAYLOAD_DEPTH) {
        return Err(CoreError::CircularStructure {
            page: page.to_string(),
        });
    }
    let json =
        serde_json::to_string(payload).map_err(|e| CoreError::Serialization(e.to_string()))?;
    Ok(html_escape_json(&json))
}

fn depth_exceeds(value: &Value, limit: usize) -> bool {
    if limit == 0 {
        return true;
    }
    match value {
        Value::Array(items) => items.iter().any(|v| depth_exceeds(v, limit - 1)),
        Value::Object(map) => map.values().any(|v| depth_exceeds(v, limit - 1)),
        _ => false,
    }
}
