//! Health analyzer port - AI inference over biomarker readings

use async_trait::async_trait;
use domain::{AnalysisResult, BiomarkerReading};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Port for biomarker analysis
#[cfg_attr(test, automock)]
#[async_trait]
pub trait HealthAnalyzer: Send + Sync {
    /// Score the readings and assess the user's risk level
    async fn analyze_biomarkers(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        readings: &[BiomarkerReading],
    ) -> Result<AnalysisResult, ApplicationError>;
}
