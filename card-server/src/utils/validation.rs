//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! profile and card services. Postgres TEXT has no length enforcement of its
//! own.

use serde_json::Value;
use shared::error::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Names: person, card, company, degree, award title, product
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, captions, office hours text
pub const MAX_NOTE_LEN: usize = 500;

/// Short identifiers: phone numbers, dates, template type
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image references
pub const MAX_URL_LEN: usize = 2048;

/// Addresses, measured on the stored JSON
pub const MAX_ADDRESS_LEN: usize = 500;

/// Personal bio
pub const MAX_BIO_LEN: usize = 2000;

/// Card slugs
pub const MAX_SLUG_LEN: usize = 100;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

/// Addresses may be a string, an array of parts or an object of parts.
pub fn validate_address(value: &Option<Value>, field: &str) -> Result<(), AppError> {
    let Some(v) = value else {
        return Ok(());
    };
    match v {
        Value::Null | Value::String(_) | Value::Array(_) | Value::Object(_) => {}
        _ => {
            return Err(AppError::validation(format!(
                "{field} must be a string, a list or an object"
            )));
        }
    }
    let len = v.to_string().len();
    if len > MAX_ADDRESS_LEN {
        return Err(AppError::validation(format!(
            "{field} is too long ({len} chars, max {MAX_ADDRESS_LEN})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required_text() {
        assert!(validate_required_text("Jane", "full_name", MAX_NAME_LEN).is_ok());
        assert!(validate_required_text("   ", "full_name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text(&"x".repeat(201), "full_name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text() {
        assert!(validate_optional_text(&None, "bio", MAX_BIO_LEN).is_ok());
        assert!(validate_optional_text(&Some("".into()), "bio", MAX_BIO_LEN).is_ok());
        assert!(validate_optional_text(&Some("x".repeat(2001)), "bio", MAX_BIO_LEN).is_err());
    }

    #[test]
    fn test_address_shapes() {
        assert!(validate_address(&None, "home_address").is_ok());
        assert!(validate_address(&Some(json!("1 Main St")), "home_address").is_ok());
        assert!(validate_address(&Some(json!(["1 Main St", "Springfield"])), "a").is_ok());
        assert!(validate_address(&Some(json!({"street": "1 Main St"})), "a").is_ok());
        assert!(validate_address(&Some(json!(42)), "a").is_err());
        assert!(validate_address(&Some(json!("x".repeat(600))), "a").is_err());
    }
}
