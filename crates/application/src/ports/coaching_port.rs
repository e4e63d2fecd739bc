//! Coaching generator port

use async_trait::async_trait;
use domain::{AnalysisResult, CoachingAdvice};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Port for turning an analysis into user-facing coaching
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CoachingGenerator: Send + Sync {
    /// Generate coaching advice for an analysis
    async fn generate_from_analysis(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        analysis: &AnalysisResult,
    ) -> Result<CoachingAdvice, ApplicationError>;
}
