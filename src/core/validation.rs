//! Input validation for store keys.

use crate::error::{Result, ValidationError};

/// Check whether a key is acceptable without building an error.
///
/// See [`validate_key`] for the rule.
pub fn is_valid_key(key: &str) -> bool {
    validate_key(key).is_ok()
}

/// Validate a store key.
///
/// Keys must satisfy:
/// - Not empty
/// - Only ASCII letters, digits, space, underscore and hyphen
/// - No leading or trailing space
///
/// # Errors
///
/// Returns `ValidationError` describing the first rule the key breaks.
pub fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(ValidationError::EmptyKey.into());
    }

    for (i, ch) in key.chars().enumerate() {
        if !is_key_char(ch) {
            return Err(ValidationError::InvalidCharacter {
                key: key.to_string(),
                ch,
                position: i + 1,
            }
            .into());
        }
    }

    if key.starts_with(' ') || key.ends_with(' ') {
        return Err(ValidationError::SurroundingSpace(key.to_string()).into());
    }

    Ok(())
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || matches!(ch, ' ' | '_' | '-')
}
