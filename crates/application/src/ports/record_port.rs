//! Health record provider port

use async_trait::async_trait;
use domain::HealthRecordItem;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Port for reading a user's health records
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// Get at most `limit` records whose type is in `scope`
    async fn get_records_by_scope(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        scope: &[String],
        limit: usize,
    ) -> Result<Vec<HealthRecordItem>, ApplicationError>;
}
