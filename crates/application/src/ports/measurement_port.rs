//! Measurement provider port
//!
//! Supplies the results of a completed measurement session.

use async_trait::async_trait;
use domain::MeasurementResult;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Port for reading measurement session results
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MeasurementProvider: Send + Sync {
    /// Get the results of a finished measurement session
    async fn get_session_results(
        &self,
        ctx: &FlowContext,
        session_id: &str,
    ) -> Result<MeasurementResult, ApplicationError>;
}
