//! In-memory subscription store
//!
//! Users without a subscription are on the free tier. Each feature requires
//! a minimum tier; features missing from the table are denied to everyone.

use std::collections::HashMap;
use std::sync::Arc;

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::{FeatureAccess, SubscriptionChecker};
use async_trait::async_trait;
use domain::SubscriptionTier;
use parking_lot::RwLock;
use tracing::debug;

/// Feature name to the minimum tier that unlocks it
pub const FEATURE_REQUIREMENTS: &[(&str, SubscriptionTier)] = &[
    ("basic_measurement", SubscriptionTier::Free),
    ("measurement_history", SubscriptionTier::Free),
    ("cartridge_purchase", SubscriptionTier::Free),
    ("data_export", SubscriptionTier::Premium),
    ("multi_device", SubscriptionTier::Premium),
    ("family_sharing", SubscriptionTier::Premium),
    ("ai_coaching", SubscriptionTier::Professional),
    ("trend_analysis", SubscriptionTier::Professional),
    ("health_score", SubscriptionTier::Professional),
    ("telemedicine", SubscriptionTier::Enterprise),
    ("medical_matching", SubscriptionTier::Enterprise),
    ("fhir_integration", SubscriptionTier::Enterprise),
];

/// In-memory implementation of [`SubscriptionChecker`]
#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriptionStore {
    tiers: Arc<RwLock<HashMap<String, SubscriptionTier>>>,
}

impl InMemorySubscriptionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a user's tier
    pub fn subscribe(&self, user_id: impl Into<String>, tier: SubscriptionTier) {
        self.tiers.write().insert(user_id.into(), tier);
    }

    /// Current tier of a user
    #[must_use]
    pub fn tier_of(&self, user_id: &str) -> SubscriptionTier {
        self.tiers.read().get(user_id).copied().unwrap_or_default()
    }

    /// Minimum tier required for a feature
    #[must_use]
    pub fn required_tier(feature: &str) -> Option<SubscriptionTier> {
        FEATURE_REQUIREMENTS
            .iter()
            .find(|(name, _)| *name == feature)
            .map(|(_, tier)| *tier)
    }
}

#[async_trait]
impl SubscriptionChecker for InMemorySubscriptionStore {
    async fn check_feature_access(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
        feature: &str,
    ) -> Result<FeatureAccess, ApplicationError> {
        let tier = self.tier_of(user_id);
        let granted = Self::required_tier(feature).is_some_and(|required| tier >= required);

        debug!(user_id, feature, %tier, granted, "Feature access checked");
        Ok(FeatureAccess {
            granted,
            tier: tier.as_str().to_string(),
        })
    }

    async fn get_subscription_tier(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
    ) -> Result<String, ApplicationError> {
        Ok(self.tier_of(user_id).as_str().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_user_is_free_tier() {
        let store = InMemorySubscriptionStore::new();
        let ctx = FlowContext::new();

        assert_eq!(store.get_subscription_tier(&ctx, "ghost").await.unwrap(), "free");
        let access = store
            .check_feature_access(&ctx, "ghost", "cartridge_purchase")
            .await
            .unwrap();
        assert_eq!(access, FeatureAccess::granted("free"));
    }

    #[tokio::test]
    async fn tier_gates_features() {
        let store = InMemorySubscriptionStore::new();
        store.subscribe("user-1", SubscriptionTier::Premium);
        let ctx = FlowContext::new();

        let export = store.check_feature_access(&ctx, "user-1", "data_export").await.unwrap();
        assert!(export.granted);

        let fhir = store
            .check_feature_access(&ctx, "user-1", "fhir_integration")
            .await
            .unwrap();
        assert_eq!(fhir, FeatureAccess::denied("premium"));
    }

    #[tokio::test]
    async fn unknown_feature_is_denied() {
        let store = InMemorySubscriptionStore::new();
        store.subscribe("user-1", SubscriptionTier::Enterprise);

        let access = store
            .check_feature_access(&FlowContext::new(), "user-1", "teleportation")
            .await
            .unwrap();

        assert!(!access.granted);
        assert_eq!(access.tier, "enterprise");
    }
}
