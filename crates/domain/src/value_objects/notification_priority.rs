//! Notification priority value object

use serde::{Deserialize, Serialize};
use std::fmt;

use super::RiskLevel;

/// Delivery priority of a push notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    /// Informational notice
    #[default]
    Normal,
    /// Requires the user's immediate attention
    Urgent,
}

impl NotificationPriority {
    /// Derive the priority from an analyzer risk level
    #[must_use]
    pub const fn for_risk(risk: RiskLevel) -> Self {
        if risk.is_escalated() {
            Self::Urgent
        } else {
            Self::Normal
        }
    }

    /// Wire representation used by the notification service
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
