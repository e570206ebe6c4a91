//! Order code normalization utilities.
//!
//! Merchize names each fulfillment package after its order code plus a
//! fulfillment sequence suffix (`RK-32344-92365-F1`, `RK-32344-92365-F2`, ...).
//! Comparisons against a pasted order code are done on the base code.

use regex::Regex;
use std::sync::LazyLock;

/// Trailing fulfillment-sequence suffix, e.g. `-F1` or `-f12`.
static FULFILLMENT_SUFFIX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(.+)-F\d+$").unwrap());

/// Strips a trailing `-F<digits>` suffix from a code.
///
/// The input is trimmed first. Codes without the suffix are returned unchanged.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(strip_fulfillment_suffix("RK-32344-92365-F1"), "RK-32344-92365");
/// assert_eq!(strip_fulfillment_suffix("RK-32344-92365"), "RK-32344-92365");
/// ```
pub fn strip_fulfillment_suffix(code: &str) -> &str {
    let code = code.trim();

    FULFILLMENT_SUFFIX_REGEX
        .captures(code)
        .and_then(|caps| caps.get(1))
        .map_or(code, |base| base.as_str())
}

/// Returns the trimmed value, or `None` when nothing but whitespace remains.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_single_digit_suffix() {
        assert_eq!(strip_fulfillment_suffix("RK-32344-92365-F1"), "RK-32344-92365");
    }

    #[test]
    fn test_strip_multi_digit_lowercase_suffix() {
        assert_eq!(strip_fulfillment_suffix("rk-1-2-f12"), "rk-1-2");
    }

    #[test]
    fn test_code_without_suffix_unchanged() {
        assert_eq!(strip_fulfillment_suffix("RK-32344-92365"), "RK-32344-92365");
    }

    #[test]
    fn test_suffix_must_be_trailing() {
        assert_eq!(strip_fulfillment_suffix("RK-F1-92365"), "RK-F1-92365");
    }

    #[test]
    fn test_suffix_without_digits_kept() {
        assert_eq!(strip_fulfillment_suffix("RK-92365-F"), "RK-92365-F");
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert_eq!(strip_fulfillment_suffix("  RK-1-F3 \t"), "RK-1");
    }

    #[test]
    fn test_bare_suffix_is_not_a_code() {
        assert_eq!(strip_fulfillment_suffix("-F1"), "-F1");
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank("  abc "), Some("abc"));
        assert_eq!(non_blank(" \t "), None);
        assert_eq!(non_blank(""), None);
    }
}
