//! Consent status value object

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a data-sharing consent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentStatus {
    /// Consent is in force
    Active,
    /// The user withdrew the consent
    Revoked,
    /// The consent service marked the consent as lapsed
    Expired,
}

impl ConsentStatus {
    /// Wire representation used by the consent service
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Revoked => "revoked",
            Self::Expired => "expired",
        }
    }
}

impl fmt::Display for ConsentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ConsentStatus {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "revoked" | "withdrawn" => Ok(Self::Revoked),
            "expired" => Ok(Self::Expired),
            _ => Err("Invalid consent status"),
        }
    }
}
