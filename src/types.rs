// =============================================================================
// Shared types used across the FRAMA engine
// =============================================================================

use serde::{Deserialize, Serialize};

/// Which price column of a daily quote feeds the indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceField {
    Open,
    High,
    Low,
    Close,
}

impl Default for PriceField {
    fn default() -> Self {
        Self::Close
    }
}

impl std::fmt::Display for PriceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Open => write!(f, "Open"),
            Self::High => write!(f, "High"),
            Self::Low => write!(f, "Low"),
            Self::Close => write!(f, "Close"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_close() {
        assert_eq!(PriceField::default(), PriceField::Close);
    }

    #[test]
    fn serde_uses_variant_names() {
        let f: PriceField = serde_json::from_str("\"High\"").unwrap();
        assert_eq!(f, PriceField::High);
        assert_eq!(serde_json::to_string(&PriceField::Low).unwrap(), "\"Low\"");
        assert_eq!(PriceField::Open.to_string(), "Open");
    }
}
