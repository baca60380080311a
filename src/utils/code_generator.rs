//! Random code generation and validation for operator-chosen identifiers.

use crate::error::AppError;
use base64::Engine as _;
use serde_json::json;

/// Length of link short codes.
pub const SHORT_CODE_LENGTH: usize = 6;

/// Length of generated affiliate codes.
pub const AFFILIATE_CODE_LENGTH: usize = 8;

/// Reserved values that would shadow system routes when used in a path.
const RESERVED: &[&str] = &["api", "health", "pixel", "convert", "r", "go", "admin"];

/// Generates a random URL-safe code of exactly `length` characters.
///
/// Uses `getrandom` for entropy and URL-safe base64 without padding, so the
/// alphabet is `A-Z a-z 0-9 - _`.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code(length: usize) -> String {
    // 3 bytes encode to 4 characters
    let mut buffer = vec![0u8; length.div_ceil(4) * 3];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    let mut code = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer);
    code.truncate(length);
    code
}

/// Generates a link short code.
pub fn generate_short_code() -> String {
    generate_code(SHORT_CODE_LENGTH)
}

/// Validates an operator-chosen slug or affiliate code.
///
/// # Rules
///
/// - Length: 2-64 characters
/// - Allowed characters: lowercase letters, digits, hyphens
/// - Cannot start or end with a hyphen
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_slug(field: &str, value: &str) -> Result<(), AppError> {
    if value.len() < 2 || value.len() > 64 {
        return Err(AppError::bad_request(
            format!("{} must be 2-64 characters", field),
            json!({ "field": field, "provided_length": value.len() }),
        ));
    }

    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err(AppError::bad_request(
            format!(
                "{} can only contain lowercase letters, digits, and hyphens",
                field
            ),
            json!({ "field": field, "value": value }),
        ));
    }

    if value.starts_with('-') || value.ends_with('-') {
        return Err(AppError::bad_request(
            format!("{} cannot start or end with a hyphen", field),
            json!({ "field": field, "value": value }),
        ));
    }

    if RESERVED.contains(&value) {
        return Err(AppError::bad_request(
            "This value is reserved",
            json!({ "field": field, "value": value }),
        ));
    }

    Ok(())
}
