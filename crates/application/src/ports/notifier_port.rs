//! Notifier port - push notifications to a user

use async_trait::async_trait;
use domain::NotificationPriority;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// A notification to deliver to one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub user_id: String,
    pub title: String,
    pub body: String,
    pub priority: NotificationPriority,
}

/// Port for sending notifications
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver a notification
    async fn notify(
        &self,
        ctx: &FlowContext,
        notification: &Notification,
    ) -> Result<(), ApplicationError>;
}
