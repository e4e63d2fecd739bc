//! Value Objects - Immutable, identity-less domain primitives

mod consent_status;
mod notification_priority;
mod risk_level;
mod subscription_tier;

pub use consent_status::ConsentStatus;
pub use notification_priority::NotificationPriority;
pub use risk_level::RiskLevel;
pub use subscription_tier::{SubscriptionTier, tier_discount};
