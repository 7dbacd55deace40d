//! Short token generation and custom token validation.
//!
//! Generated tokens come from the operating system CSPRNG and are encoded with
//! the URL-safe base64 alphabet. They are high-entropy candidates only:
//! uniqueness is enforced by the shortening service against the store.

use base64::Engine as _;

use crate::error::ValidationError;
use crate::utils::url_validator::contains_disallowed_pattern;

/// Length of generated tokens unless configured otherwise.
pub const DEFAULT_TOKEN_LENGTH: usize = 6;

/// Path segments that already route somewhere else, so a token equal to one
/// of them could never be resolved.
pub const RESERVED_TOKENS: &[&str] = &["links", "resolve", "health", "events", ".", ".."];

fn is_path_unsafe(c: char) -> bool {
    matches!(c, '/' | '?' | '#' | '%') || c.is_whitespace() || c.is_control()
}

/// Generates a random URL-safe token of exactly `length` characters.
///
/// Draws `length` random bytes, encodes them as URL-safe base64 without
/// padding and truncates the result to `length` characters.
///
/// # Errors
///
/// Returns an error if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let token = generate_token(6)?;
/// assert_eq!(token.len(), 6);
/// ```
pub fn generate_token(length: usize) -> Result<String, getrandom::Error> {
    let mut buffer = vec![0u8; length];
    getrandom::fill(&mut buffer)?;

    let mut token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(&buffer);
    token.truncate(length);

    Ok(token)
}

/// Validates a user-supplied custom token.
///
/// A token that is empty after trimming counts as not supplied and yields
/// `Ok(None)`. Custom tokens are stored verbatim, so any disallowed substring
/// is rejected instead of stripped.
///
/// # Errors
///
/// Returns [`ValidationError::ContainsDisallowedPattern`] if the token contains
/// quotes, semicolons, comment markers or SQL keywords, and
/// [`ValidationError::ReservedToken`] if it names a route or cannot be carried
/// as a single path segment.
pub fn validate_custom_token(input: &str) -> Result<Option<String>, ValidationError> {
    let token = input.trim();

    if token.is_empty() {
        return Ok(None);
    }

    if contains_disallowed_pattern(token) {
        return Err(ValidationError::ContainsDisallowedPattern);
    }

    if RESERVED_TOKENS.contains(&token) || token.chars().any(is_path_unsafe) {
        return Err(ValidationError::ReservedToken {
            token: token.to_string(),
        });
    }

    Ok(Some(token.to_string()))
}
