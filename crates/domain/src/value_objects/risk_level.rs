//! Risk level value object
//!
//! Risk is assessed entirely by the analyzer. The orchestration layer only
//! maps it onto presentation concerns such as notification priority.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Health risk level assigned by the analyzer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No relevant findings
    #[default]
    Low,
    /// Minor deviations worth watching
    Medium,
    /// Significant deviations
    High,
    /// Multiple severe deviations
    Critical,
}

impl RiskLevel {
    /// Whether this level warrants an escalated (urgent) notification
    #[must_use]
    pub const fn is_escalated(&self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }

    /// Wire representation used by the analyzer service
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RiskLevel {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            _ => Err("Invalid risk level"),
        }
    }
}
