//! Address normalization
//!
//! Addresses are stored as free JSON: a plain string, an array of parts, or
//! an object of named parts. All three shapes render as one line.

use serde_json::Value;

/// Render a stored address as a single display line.
///
/// String parts are trimmed and empty ones skipped; non-string parts
/// (numbers, nested objects, null) are dropped. Parts are joined with `", "`
/// in stored order. Returns `None` when nothing displayable remains.
pub fn format_address(value: &Value) -> Option<String> {
    let joined = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Array(parts) => join_parts(parts.iter()),
        Value::Object(fields) => join_parts(fields.values()),
        _ => String::new(),
    };
    if joined.is_empty() { None } else { Some(joined) }
}

fn join_parts<'a>(parts: impl Iterator<Item = &'a Value>) -> String {
    parts
        .filter_map(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_all_shapes_render_the_same() {
        let expected = Some("123 Main St, Springfield".to_string());
        assert_eq!(
            format_address(&json!("123 Main St, Springfield")),
            expected
        );
        assert_eq!(
            format_address(&json!(["123 Main St", "Springfield"])),
            expected
        );
        assert_eq!(
            format_address(&json!({"street": "123 Main St", "city": "Springfield"})),
            expected
        );
    }

    #[test]
    fn test_plain_string() {
        assert_eq!(
            format_address(&json!("123 Main St")),
            Some("123 Main St".to_string())
        );
    }

    #[test]
    fn test_drops_non_string_and_blank_parts() {
        assert_eq!(
            format_address(&json!(["", "Elm St", 42, null, {"x": "y"}, "  Paris "])),
            Some("Elm St, Paris".to_string())
        );
        assert_eq!(
            format_address(&json!({"zip": 75001, "city": "Paris", "note": " "})),
            Some("Paris".to_string())
        );
    }

    #[test]
    fn test_nothing_displayable() {
        assert_eq!(format_address(&json!("   ")), None);
        assert_eq!(format_address(&json!([])), None);
        assert_eq!(format_address(&json!({})), None);
        assert_eq!(format_address(&json!(12)), None);
        assert_eq!(format_address(&Value::Null), None);
    }
}
