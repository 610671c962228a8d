//! Country metadata.

use serde::{Deserialize, Serialize};

/// ISO identity of a Haver geography.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code (e.g., "US").
    alpha2: String,
    /// Country or region name.
    name: String,
}

impl Country {
    /// Creates a new country entry.
    #[must_use]
    pub fn new(alpha2: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            alpha2: alpha2.into(),
            name: name.into(),
        }
    }

    /// Returns the ISO alpha-2 code.
    #[must_use]
    pub fn alpha2(&self) -> &str {
        &self.alpha2
    }

    /// Returns the country name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.alpha2)
    }
}
