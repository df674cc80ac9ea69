//! Account field rules used by registration.

use std::sync::LazyLock;

use regex::Regex;

/// Maximum length of a username.
pub const MAX_USERNAME_LENGTH: usize = 150;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Letters, digits, and `@ . + - _` only.
static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\w.@+-]+$").expect("valid regex"));

/// Validate a username: non-empty, at most 150 characters, restricted charset.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }
    if username.chars().count() > MAX_USERNAME_LENGTH {
        return Err(format!("Username exceeds maximum length of {MAX_USERNAME_LENGTH} characters"));
    }
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username may contain only letters, digits, and @/./+/-/_ characters".to_string(),
        );
    }
    Ok(())
}
