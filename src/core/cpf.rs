//! CPF (Cadastro de Pessoas Físicas) checksum validation and display mask.

use crate::core::digits::{all_equal, strip_non_digits, to_values};

pub const CPF_LENGTH: usize = 11;

/// Strips punctuation, leaving only the digits of a CPF.
pub fn normalize(input: &str) -> String {
    strip_non_digits(input)
}

/// Weighted-sum modulo-11 check digit over `digits`, with weights counting
/// down from `digits.len() + 1` to 2.
fn check_digit(digits: &[u32]) -> u32 {
    let top = digits.len() as u32 + 1;
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, d)| d * (top - i as u32))
        .sum();
    let remainder = (sum * 10) % 11;
    if remainder >= 10 {
        0
    } else {
        remainder
    }
}

/// Computes both check digits for a 9-digit CPF base.
///
/// Punctuation in `base` is ignored. Returns `None` unless exactly nine
/// digits remain.
pub fn check_digits(base: &str) -> Option<(u8, u8)> {
    let mut values = to_values(&strip_non_digits(base))?;
    if values.len() != 9 {
        return None;
    }
    let first = check_digit(&values);
    values.push(first);
    let second = check_digit(&values);
    Some((first as u8, second as u8))
}

/// Returns true when `input` holds a CPF with valid check digits.
///
/// Punctuation is ignored. Eleven identical digits (`000.000.000-00` and so
/// on) satisfy the checksum but are rejected.
pub fn validate_cpf(input: &str) -> bool {
    let digits = normalize(input);
    if digits.len() != CPF_LENGTH || all_equal(&digits) {
        return false;
    }

    let Some(values) = to_values(&digits) else {
        return false;
    };

    check_digit(&values[..9]) == values[9] && check_digit(&values[..10]) == values[10]
}

/// Renders the digits of `input` as `###.###.###-##`.
///
/// With fewer than eleven digits the stripped digits are returned as they are,
/// so partial input while typing is never mangled. Digits beyond the eleventh
/// are appended after the mask.
pub fn format_cpf(input: &str) -> String {
    let digits = normalize(input);
    if digits.len() < CPF_LENGTH {
        return digits;
    }

    format!(
        "{}.{}.{}-{}{}",
        &digits[0..3],
        &digits[3..6],
        &digits[6..9],
        &digits[9..11],
        &digits[11..]
    )
}
