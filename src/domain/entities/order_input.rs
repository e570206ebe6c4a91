//! Normalized request units sent to provider clients.

use serde::{Deserialize, Serialize};

/// Identifier namespace of a lookup value.
///
/// Namespaces are provider-specific and not interchangeable: Merchize
/// resolves order codes and external numbers, Dreamship resolves its own
/// order ids (its order code) and reference ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierKind {
    OrderCode,
    ReferenceId,
    ExternalNumber,
}

/// What a bulk lookup is for. Merchize serves the two from different endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupPurpose {
    OrderCode,
    Tracking,
}

/// One identifier to resolve against a provider.
///
/// A row may carry a second key of another kind. Match cascades try every
/// key the row has, in cascade order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderOrderInput {
    pub value: String,
    pub kind: IdentifierKind,
    pub alternate: Option<(IdentifierKind, String)>,
    /// Merchize store identifier, forwarded as-is when present.
    pub identifier: Option<String>,
}

impl ProviderOrderInput {
    /// Creates an input, trimming the value.
    pub fn new(value: impl AsRef<str>, kind: IdentifierKind) -> Self {
        Self {
            value: value.as_ref().trim().to_string(),
            kind,
            alternate: None,
            identifier: None,
        }
    }

    /// Attaches a second key; blank or same-kind keys are dropped.
    pub fn with_alternate(mut self, kind: IdentifierKind, value: Option<&str>) -> Self {
        self.alternate = value
            .map(str::trim)
            .filter(|v| !v.is_empty() && kind != self.kind)
            .map(|v| (kind, v.to_string()));
        self
    }

    /// The key of the given kind, if the row has one.
    pub fn key(&self, kind: IdentifierKind) -> Option<&str> {
        if self.kind == kind {
            return Some(self.value.as_str()).filter(|v| !v.is_empty());
        }

        self.alternate
            .as_ref()
            .filter(|(alternate, _)| *alternate == kind)
            .map(|(_, value)| value.as_str())
    }

    /// Attaches a store identifier; blank identifiers are dropped.
    pub fn with_identifier(mut self, identifier: Option<String>) -> Self {
        self.identifier = identifier
            .map(|id| id.trim().to_string())
            .filter(|id| !id.is_empty());
        self
    }

    pub fn order_code(value: impl AsRef<str>) -> Self {
        Self::new(value, IdentifierKind::OrderCode)
    }

    pub fn reference_id(value: impl AsRef<str>) -> Self {
        Self::new(value, IdentifierKind::ReferenceId)
    }

    pub fn external_number(value: impl AsRef<str>) -> Self {
        Self::new(value, IdentifierKind::ExternalNumber)
    }

    /// Returns true if there is nothing to look up.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_trimmed() {
        let input = ProviderOrderInput::external_number("  MYSHOP-0001 ");
        assert_eq!(input.value, "MYSHOP-0001");
        assert_eq!(input.kind, IdentifierKind::ExternalNumber);
        assert!(!input.is_empty());
    }

    #[test]
    fn test_blank_identifier_dropped() {
        let input = ProviderOrderInput::order_code("RK-1").with_identifier(Some("  ".into()));
        assert_eq!(input.identifier, None);

        let input = ProviderOrderInput::order_code("RK-1").with_identifier(Some("store-9".into()));
        assert_eq!(input.identifier.as_deref(), Some("store-9"));
    }

    #[test]
    fn test_alternate_key() {
        let input = ProviderOrderInput::order_code("RK-1")
            .with_alternate(IdentifierKind::ExternalNumber, Some(" MYSHOP-1 "));

        assert_eq!(input.key(IdentifierKind::OrderCode), Some("RK-1"));
        assert_eq!(input.key(IdentifierKind::ExternalNumber), Some("MYSHOP-1"));
        assert_eq!(input.key(IdentifierKind::ReferenceId), None);

        let input = ProviderOrderInput::order_code("RK-1")
            .with_alternate(IdentifierKind::ExternalNumber, Some("  "));
        assert_eq!(input.alternate, None);

        let input = ProviderOrderInput::order_code("RK-1")
            .with_alternate(IdentifierKind::OrderCode, Some("RK-2"));
        assert_eq!(input.key(IdentifierKind::OrderCode), Some("RK-1"));
    }

    #[test]
    fn test_blank_value_is_empty() {
        assert!(ProviderOrderInput::reference_id("   ").is_empty());
    }
}
