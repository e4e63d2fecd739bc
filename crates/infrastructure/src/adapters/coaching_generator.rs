//! Template-based coaching generator

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::CoachingGenerator;
use async_trait::async_trait;
use domain::{AnalysisResult, CoachingAdvice, NotificationPriority};
use tracing::debug;

/// Builds coaching advice from a fixed Korean template
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateCoachingGenerator;

impl TemplateCoachingGenerator {
    /// Create a new generator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Render advice for an analysis
    #[must_use]
    pub fn render(analysis: &AnalysisResult) -> CoachingAdvice {
        let message = if analysis.has_anomalies() {
            format!(
                "건강 점수 {:.0}점입니다. {}개의 주의 항목이 있습니다.",
                analysis.health_score,
                analysis.anomalies.len()
            )
        } else {
            format!(
                "건강 점수 {:.0}점입니다. 모든 항목이 정상 범위입니다.",
                analysis.health_score
            )
        };

        CoachingAdvice {
            message,
            action_items: analysis.recommendations.clone(),
            priority: NotificationPriority::for_risk(analysis.risk_level),
        }
    }
}

#[async_trait]
impl CoachingGenerator for TemplateCoachingGenerator {
    async fn generate_from_analysis(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
        analysis: &AnalysisResult,
    ) -> Result<CoachingAdvice, ApplicationError> {
        let advice = Self::render(analysis);
        debug!(user_id, priority = %advice.priority, "Coaching generated");
        Ok(advice)
    }
}
