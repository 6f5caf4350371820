use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Minimal `local@domain.tld` shape check. No RFC 5322 parsing.
pub fn validate_email(input: &str) -> bool {
    EMAIL_PATTERN.is_match(input)
}
