//! Access audit port - records who received which records

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// A data-access event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessLogEntry {
    /// Owner of the accessed data
    pub user_id: String,
    /// Party that received the data
    pub provider_id: String,
    pub action: String,
    pub resource_type: String,
    pub resource_ids: Vec<String>,
}

/// Port for data-access audit logging
#[cfg_attr(test, automock)]
#[async_trait]
pub trait AccessAuditLogger: Send + Sync {
    /// Record an access event
    async fn log_access(
        &self,
        ctx: &FlowContext,
        entry: &AccessLogEntry,
    ) -> Result<(), ApplicationError>;
}
