//! In-memory data-access audit log
//!
//! Appends every access entry with the time it was recorded. The failure
//! switch makes the log reject writes, for exercising best-effort auditing.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::{AccessAuditLogger, AccessLogEntry};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::info;

/// An audit entry as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordedAccess {
    pub entry: AccessLogEntry,
    pub request_id: String,
    pub recorded_at: DateTime<Utc>,
}

/// In-memory implementation of [`AccessAuditLogger`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryAccessAuditLog {
    entries: Arc<Mutex<Vec<RecordedAccess>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryAccessAuditLog {
    /// Create an empty audit log
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Entries recorded so far, oldest first
    #[must_use]
    pub fn entries(&self) -> Vec<RecordedAccess> {
        self.entries.lock().clone()
    }
}

#[async_trait]
impl AccessAuditLogger for InMemoryAccessAuditLog {
    async fn log_access(
        &self,
        ctx: &FlowContext,
        entry: &AccessLogEntry,
    ) -> Result<(), ApplicationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(ApplicationError::ExternalService(
                "audit store unavailable".into(),
            ));
        }

        info!(
            user_id = %entry.user_id,
            provider_id = %entry.provider_id,
            action = %entry.action,
            resources = entry.resource_ids.len(),
            "Data access recorded"
        );
        self.entries.lock().push(RecordedAccess {
            entry: entry.clone(),
            request_id: ctx.request_id().to_string(),
            recorded_at: Utc::now(),
        });
        Ok(())
    }
}
