//! Orchestration and demo-seed configuration.

use serde::{Deserialize, Serialize};

/// Orchestration settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowConfig {
    /// Deadline for one orchestration call, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

const fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

/// Identities used when seeding the in-memory collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// User that owns the seeded session, subscription, consents and records
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// Subscription tier of the demo user (wire name)
    #[serde(default = "default_tier")]
    pub tier: String,

    /// Provider the seeded consents are granted to
    #[serde(default = "default_provider_id")]
    pub provider_id: String,
}

fn default_user_id() -> String {
    "demo-user".to_string()
}

fn default_tier() -> String {
    "premium".to_string()
}

fn default_provider_id() -> String {
    "hospital-001".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            tier: default_tier(),
            provider_id: default_provider_id(),
        }
    }
}
