//! Subscription tier value object and the tier discount table
//!
//! The discount table is pure data kept in one place so the pricing rule
//! stays auditable. Tiers arrive from the subscription service as strings,
//! so the lookup accepts any string and falls back to no discount.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Tier name to discount fraction. Tiers not listed get no discount.
const TIER_DISCOUNTS: [(&str, f64); 4] = [
    ("free", 0.0),
    ("premium", 0.15),
    ("professional", 0.25),
    ("enterprise", 0.30),
];

/// Discount fraction (0.0 to 0.30) granted to a subscription tier
///
/// Unknown or empty tier names yield `0.0`.
#[must_use]
pub fn tier_discount(tier: &str) -> f64 {
    TIER_DISCOUNTS
        .iter()
        .find(|(name, _)| *name == tier)
        .map_or(0.0, |(_, rate)| *rate)
}

/// Subscription level controlling feature access and pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionTier {
    /// No paid plan
    #[default]
    Free,
    /// Individual paid plan
    Premium,
    /// Plan for health professionals
    Professional,
    /// Organisation-wide plan
    Enterprise,
}

impl SubscriptionTier {
    /// Parse a tier from its wire name
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "free" => Some(Self::Free),
            "premium" => Some(Self::Premium),
            "professional" => Some(Self::Professional),
            "enterprise" => Some(Self::Enterprise),
            _ => None,
        }
    }

    /// Wire name used by the subscription service
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Premium => "premium",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    /// Discount fraction granted by this tier
    #[must_use]
    pub fn discount_rate(&self) -> f64 {
        tier_discount(self.as_str())
    }

    /// All tiers in ascending order
    #[must_use]
    pub const fn all() -> [Self; 4] {
        [Self::Free, Self::Premium, Self::Professional, Self::Enterprise]
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
