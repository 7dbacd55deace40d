//! Long URL sanitization and validation.
//!
//! Input is trimmed, stripped of substrings that resemble SQL control tokens,
//! given an `http://` scheme when it has none, and finally checked with the
//! `url` parser. The sanitized, scheme-prefixed string is the normalized form
//! that gets stored and compared for uniqueness.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use url::Url;

use crate::error::ValidationError;

/// Minimum length of a long URL after sanitization.
pub const MIN_URL_LENGTH: usize = 5;

/// Schemes accepted as-is. Anything else gets `http://` prepended.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Quotes, semicolons, SQL comment markers and a fixed list of SQL keywords.
static DISALLOWED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)('|"|;|--|/\*|\*/|\b(?:SELECT|INSERT|UPDATE|DELETE|DROP|UNION|EXEC|DECLARE|ALTER|CREATE)\b)"#,
    )
    .unwrap()
});

/// Removes every disallowed substring from `input`.
///
/// Borrows when nothing matched, so benign input comes back untouched.
pub fn sanitize_input(input: &str) -> Cow<'_, str> {
    DISALLOWED_PATTERN.replace_all(input, "")
}

/// Returns true if `input` contains any disallowed substring.
pub fn contains_disallowed_pattern(input: &str) -> bool {
    DISALLOWED_PATTERN.is_match(input)
}

/// Validates a long URL and returns its normalized form.
///
/// # Rules
///
/// 1. Trim, then strip disallowed substrings
/// 2. Reject if fewer than [`MIN_URL_LENGTH`] characters remain
/// 3. Reject whitespace or control characters left inside the URL
/// 4. Prepend `http://` unless the input starts with `http://`, `https://` or `ftp://`
/// 5. Require an absolute URL with an allowed scheme and a non-empty host
///
/// # Errors
///
/// Returns [`ValidationError::TooShort`] for empty or short input and
/// [`ValidationError::InvalidFormat`] when the URL contains whitespace or does
/// not parse.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(validate_long_url("example.com").unwrap(), "http://example.com");
/// assert!(validate_long_url("ab").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<String, ValidationError> {
    let sanitized = sanitize_input(input.trim());
    let candidate = sanitized.trim();

    if candidate.chars().count() < MIN_URL_LENGTH {
        return Err(ValidationError::TooShort {
            min: MIN_URL_LENGTH,
        });
    }

    if candidate
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(ValidationError::InvalidFormat(
            "URL contains whitespace or control characters".to_string(),
        ));
    }

    let candidate = if has_allowed_scheme(candidate) {
        candidate.to_string()
    } else {
        format!("http://{}", candidate)
    };

    let parsed =
        Url::parse(&candidate).map_err(|e| ValidationError::InvalidFormat(e.to_string()))?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(ValidationError::InvalidFormat(format!(
            "unsupported scheme '{}'",
            parsed.scheme()
        )));
    }

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(candidate),
        _ => Err(ValidationError::InvalidFormat(
            "URL has no host".to_string(),
        )),
    }
}

fn has_allowed_scheme(candidate: &str) -> bool {
    ALLOWED_SCHEMES.iter().any(|scheme| {
        let prefix = format!("{}://", scheme);
        candidate
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(&prefix))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepends_http_scheme() {
        assert_eq!(validate_long_url("example.com").unwrap(), "http://example.com");
    }

    #[test]
    fn test_keeps_https_url_unchanged() {
        let url = "https://example.com/path?q=rust&lang=en#top";
        assert_eq!(validate_long_url(url).unwrap(), url);
    }

    #[test]
    fn test_accepts_ftp() {
        assert_eq!(
            validate_long_url("ftp://files.example.com/a.txt").unwrap(),
            "ftp://files.example.com/a.txt"
        );
    }

    #[test]
    fn test_scheme_detection_is_case_insensitive() {
        assert_eq!(
            validate_long_url("HTTPS://example.com").unwrap(),
            "HTTPS://example.com"
        );
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(
            validate_long_url("   https://example.com/a  ").unwrap(),
            "https://example.com/a"
        );
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            validate_long_url("ab"),
            Err(ValidationError::TooShort { min: 5 })
        );
    }

    #[test]
    fn test_empty_is_too_short() {
        assert!(matches!(
            validate_long_url("   "),
            Err(ValidationError::TooShort { .. })
        ));
    }

    #[test]
    fn test_only_disallowed_content_is_too_short() {
        assert!(matches!(
            validate_long_url("'; DROP --"),
            Err(ValidationError::TooShort { .. })
        ));
    }

    #[test]
    fn test_spaces_in_host_are_invalid() {
        assert!(matches!(
            validate_long_url("not a url, has spaces"),
            Err(ValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_embedded_line_breaks_and_tabs_are_invalid() {
        for input in [
            "http://exa\nmple.com/p",
            "http://example.com/a\r\nb",
            "example.com/\tpage",
            "https://example.com/a b",
            "https://example.com/\u{7f}",
        ] {
            assert!(
                matches!(
                    validate_long_url(input),
                    Err(ValidationError::InvalidFormat(_))
                ),
                "{input:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_port_is_invalid() {
        assert!(matches!(
            validate_long_url("javascript:alert(1)"),
            Err(ValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_strips_sql_fragments() {
        assert_eq!(
            validate_long_url("https://example.com/?id=1;DROP TABLE links--").unwrap(),
            "https://example.com/?id=1 TABLE links"
        );
    }

    #[test]
    fn test_strips_quotes_and_comment_markers() {
        assert_eq!(
            sanitize_input(r#"a'b"c/*d*/e"#),
            "abcde"
        );
    }

    #[test]
    fn test_keyword_match_is_whole_word_only() {
        let url = "https://example.com/selection/updates";
        assert_eq!(sanitize_input(url), url);
    }

    #[test]
    fn test_benign_input_is_borrowed() {
        assert!(matches!(
            sanitize_input("https://example.com/a-b_c"),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn test_contains_disallowed_pattern() {
        assert!(contains_disallowed_pattern("promo;"));
        assert!(contains_disallowed_pattern("union"));
        assert!(!contains_disallowed_pattern("promo-2026"));
    }
}
