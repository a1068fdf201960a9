//! Input validators for interactive prompts.
//!
//! The email pattern mirrors the one the server enforces, so input that
//! passes locally is never bounced back with a validation error.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

/// Checks that `value` is a plausible email address.
pub fn require_valid_email(value: &str) -> Result<(), String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_RE.is_match(value) {
        return Err("Email is not valid".to_string());
    }
    Ok(())
}

/// Checks that `value` is at least `min` characters, naming `field` in the
/// error message.
pub fn require_min_chars(value: &str, min: usize, field: &str) -> Result<(), String> {
    if value.len() >= min {
        return Ok(());
    }
    Err(format!("{field} must be at least {min} characters long"))
}
