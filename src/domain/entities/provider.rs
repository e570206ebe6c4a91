//! Fulfillment providers and platform selection.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A print-on-demand fulfillment provider an identifier can belong to.
///
/// Printway is recognized by the classifier but has no client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Merchize,
    Printway,
    Dreamship,
}

impl Provider {
    /// Human-readable provider name used in error messages.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Merchize => "Merchize",
            Self::Printway => "Printway",
            Self::Dreamship => "Dreamship",
        }
    }

    /// The other provider of the order-code fallback pair.
    ///
    /// Returns `None` for providers outside the pair.
    pub fn fallback_partner(self) -> Option<Self> {
        match self {
            Self::Merchize => Some(Self::Dreamship),
            Self::Dreamship => Some(Self::Merchize),
            Self::Printway => None,
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Platform selection for a tracking request.
///
/// `Auto` classifies each row from its text; the other variants force every
/// non-blank row onto one provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[default]
    Auto,
    Merchize,
    Printway,
    Dreamship,
}

impl Platform {
    /// Returns the explicitly chosen provider, or `None` for `Auto`.
    pub fn fixed(self) -> Option<Provider> {
        match self {
            Self::Auto => None,
            Self::Merchize => Some(Provider::Merchize),
            Self::Printway => Some(Provider::Printway),
            Self::Dreamship => Some(Provider::Dreamship),
        }
    }
}
