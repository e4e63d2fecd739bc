//! Notifier that records every delivery
//!
//! Logs each notification and keeps it for inspection. A failure switch makes
//! every delivery fail, which is how the best-effort notification step is
//! exercised end to end.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::{Notification, Notifier};
use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::info;

/// Recording implementation of [`Notifier`]
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    /// Create a notifier that accepts every delivery
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent deliveries fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Notifications delivered so far
    #[must_use]
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(
        &self,
        _ctx: &FlowContext,
        notification: &Notification,
    ) -> Result<(), ApplicationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApplicationError::ExternalService(
                "notification service unavailable".into(),
            ));
        }

        info!(
            user_id = %notification.user_id,
            title = %notification.title,
            priority = %notification.priority,
            "Notification sent"
        );
        self.sent.lock().push(notification.clone());
        Ok(())
    }
}
