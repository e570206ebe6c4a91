//! Provider classification of raw identifiers.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! | Pattern | Provider |
//! |---------|----------|
//! | `R` + letters, digits, hyphens (`RK-32344-92365`) | Merchize |
//! | `P` + letters, digits (`PW1234AB`) | Printway |
//! | digits only (`322265507`) | Dreamship |
//!
//! Anything else is unknown and must be skipped or routed to an explicitly
//! chosen provider by the caller.

use regex::Regex;
use std::sync::LazyLock;

use crate::domain::entities::Provider;

static MERCHIZE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Rr][A-Za-z0-9-]+$").unwrap());
static PRINTWAY_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[Pp][A-Za-z0-9]+$").unwrap());
static DREAMSHIP_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]+$").unwrap());

/// Guesses the source provider of an identifier.
///
/// The input is trimmed before matching. Returns `None` for unknown shapes,
/// including blank input.
pub fn classify(raw: &str) -> Option<Provider> {
    let raw = raw.trim();

    [
        (&*MERCHIZE_REGEX, Provider::Merchize),
        (&*PRINTWAY_REGEX, Provider::Printway),
        (&*DREAMSHIP_REGEX, Provider::Dreamship),
    ]
    .into_iter()
    .find_map(|(regex, provider)| regex.is_match(raw).then_some(provider))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merchize_codes() {
        assert_eq!(classify("RK-32344-92365"), Some(Provider::Merchize));
        assert_eq!(classify("rk-32344-92365-F1"), Some(Provider::Merchize));
        assert_eq!(classify("  RX12  "), Some(Provider::Merchize));
    }

    #[test]
    fn test_printway_codes() {
        assert_eq!(classify("PW12345"), Some(Provider::Printway));
        assert_eq!(classify("pABC9"), Some(Provider::Printway));
    }

    #[test]
    fn test_printway_rejects_hyphen() {
        assert_eq!(classify("PW-12345"), None);
    }

    #[test]
    fn test_dreamship_ids() {
        assert_eq!(classify("322265507"), Some(Provider::Dreamship));
    }

    #[test]
    fn test_unknown_shapes() {
        assert_eq!(classify("114-2545030-4324234"), None);
        assert_eq!(classify("MYSHOP-0001"), None);
        assert_eq!(classify("R"), None);
        assert_eq!(classify(""), None);
        assert_eq!(classify("   "), None);
        assert_eq!(classify("RK 1"), None);
    }

    #[test]
    fn test_classification_is_idempotent() {
        for raw in ["RK-1", "PW1", "123", "MYSHOP-0001", ""] {
            assert_eq!(classify(raw), classify(raw));
        }
    }
}
