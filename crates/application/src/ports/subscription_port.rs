//! Subscription checker port
//!
//! Tiers are passed as the subscription service's wire names so that new
//! tiers do not require a coordinated release of every consumer.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Outcome of a feature-access check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAccess {
    /// Whether the user may use the feature
    pub granted: bool,
    /// The user's current tier name
    pub tier: String,
}

impl FeatureAccess {
    /// Access granted under `tier`
    pub fn granted(tier: impl Into<String>) -> Self {
        Self {
            granted: true,
            tier: tier.into(),
        }
    }

    /// Access denied under `tier`
    pub fn denied(tier: impl Into<String>) -> Self {
        Self {
            granted: false,
            tier: tier.into(),
        }
    }
}

/// Port for subscription queries
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SubscriptionChecker: Send + Sync {
    /// Check whether the user's subscription allows a feature
    async fn check_feature_access(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        feature: &str,
    ) -> Result<FeatureAccess, ApplicationError>;

    /// Get the user's current tier name
    async fn get_subscription_tier(
        &self,
        ctx: &FlowContext,
        user_id: &str,
    ) -> Result<String, ApplicationError>;
}
