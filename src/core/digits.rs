//! Numeric string primitives shared by the CPF and CEP rules.

/// Keeps only the ASCII digits of `input`.
pub fn strip_non_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Converts a string of ASCII digits into their numeric values.
///
/// Returns `None` if any character is not an ASCII digit.
pub fn to_values(digits: &str) -> Option<Vec<u32>> {
    digits.chars().map(|c| c.to_digit(10)).collect()
}

/// True when every character of a non-empty string is the same.
pub fn all_equal(digits: &str) -> bool {
    let mut chars = digits.chars();
    match chars.next() {
        Some(first) => chars.all(|c| c == first),
        None => false,
    }
}
