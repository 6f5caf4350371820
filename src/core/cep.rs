//! CEP (Código de Endereçamento Postal) format check and display mask.

use crate::core::digits::strip_non_digits;
use regex::Regex;
use std::sync::LazyLock;

pub const CEP_LENGTH: usize = 8;

static CEP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}-?[0-9]{3}$").expect("valid CEP pattern"));

/// Strips punctuation, leaving only the digits of a CEP.
pub fn normalize(input: &str) -> String {
    strip_non_digits(input)
}

/// True iff `input` is `NNNNN-NNN` or `NNNNNNNN`.
pub fn validate_cep(input: &str) -> bool {
    CEP_PATTERN.is_match(input)
}

/// Renders the digits of `input` as `#####-###`.
///
/// Fewer than eight digits are returned stripped but unmasked; digits past the
/// eighth are appended after the mask.
pub fn format_cep(input: &str) -> String {
    let digits = normalize(input);
    if digits.len() < CEP_LENGTH {
        return digits;
    }
    format!("{}-{}", &digits[..5], &digits[5..])
}
