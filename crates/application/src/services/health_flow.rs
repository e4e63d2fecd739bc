//! Health measurement flow
//!
//! Turns a completed measurement session into a scored and explained
//! outcome: measurement → AI analysis → coaching → risk-based notification.
//! The first three steps are fatal. The notification is best-effort, so a
//! failed push never hides a valid analysis from the caller.

use std::fmt;
use std::sync::Arc;

use domain::{AnalysisResult, CoachingAdvice, NotificationPriority, RiskLevel};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;
use crate::ports::{CoachingGenerator, HealthAnalyzer, MeasurementProvider, Notification, Notifier};
use crate::services::step::{FlowStep, best_effort, fatal};

/// Notification title for an unremarkable result
pub const MEASUREMENT_COMPLETE_TITLE: &str = "측정 완료";

/// Notification title when the analyzer reports high or critical risk
pub const HEALTH_ALERT_TITLE: &str = "건강 이상 감지";

/// Combined result of the health flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowResult {
    pub session_id: String,
    pub user_id: String,
    pub health_score: f64,
    pub risk_level: RiskLevel,
    pub anomalies: Vec<String>,
    /// Coaching message shown to the user
    pub coaching: String,
    pub action_items: Vec<String>,
}

/// Build the result notification for an analysis
///
/// Only presentation is derived here. The risk level itself comes from the
/// analyzer and is never recomputed.
#[must_use]
pub fn result_notification(
    user_id: &str,
    analysis: &AnalysisResult,
    coaching: &CoachingAdvice,
) -> Notification {
    let title = if analysis.risk_level.is_escalated() {
        HEALTH_ALERT_TITLE
    } else {
        MEASUREMENT_COMPLETE_TITLE
    };

    Notification {
        user_id: user_id.to_string(),
        title: title.to_string(),
        body: coaching.message.clone(),
        priority: NotificationPriority::for_risk(analysis.risk_level),
    }
}

/// Coordinates measurement, analysis, coaching and notification services
pub struct HealthFlowOrchestrator {
    measurement_provider: Arc<dyn MeasurementProvider>,
    health_analyzer: Arc<dyn HealthAnalyzer>,
    coaching_generator: Arc<dyn CoachingGenerator>,
    notifier: Arc<dyn Notifier>,
}

impl fmt::Debug for HealthFlowOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HealthFlowOrchestrator").finish_non_exhaustive()
    }
}

impl HealthFlowOrchestrator {
    /// Create a new health flow orchestrator
    pub fn new(
        measurement_provider: Arc<dyn MeasurementProvider>,
        health_analyzer: Arc<dyn HealthAnalyzer>,
        coaching_generator: Arc<dyn CoachingGenerator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            measurement_provider,
            health_analyzer,
            coaching_generator,
            notifier,
        }
    }

    /// Run the full flow after a measurement session ends
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn process_measurement_completed(
        &self,
        ctx: &FlowContext,
        session_id: &str,
    ) -> Result<FlowResult, ApplicationError> {
        info!("Processing completed measurement session");

        let measurement = fatal(
            FlowStep::FetchMeasurement,
            ctx.run(|| self.measurement_provider.get_session_results(ctx, session_id))
                .await,
        )?;
        debug!(
            user_id = %measurement.user_id,
            readings = measurement.biomarkers.len(),
            "Measurement loaded"
        );

        let analysis = fatal(
            FlowStep::AnalyzeBiomarkers,
            ctx.run(|| {
                self.health_analyzer.analyze_biomarkers(
                    ctx,
                    &measurement.user_id,
                    &measurement.biomarkers,
                )
            })
            .await,
        )?;
        debug!(
            health_score = analysis.health_score,
            risk = %analysis.risk_level,
            anomalies = analysis.anomalies.len(),
            "Biomarkers analyzed"
        );

        let coaching = fatal(
            FlowStep::GenerateCoaching,
            ctx.run(|| {
                self.coaching_generator
                    .generate_from_analysis(ctx, &measurement.user_id, &analysis)
            })
            .await,
        )?;
        debug!(priority = %coaching.priority, "Coaching generated");

        let notification = result_notification(&measurement.user_id, &analysis, &coaching);
        let delivery = best_effort(
            FlowStep::SendNotification,
            ctx.run(|| self.notifier.notify(ctx, &notification)).await,
        );
        debug!(
            priority = %notification.priority,
            delivered = delivery.is_completed(),
            "Notification step finished"
        );

        info!(risk = %analysis.risk_level, "Health flow completed");

        Ok(FlowResult {
            session_id: session_id.to_string(),
            user_id: measurement.user_id,
            health_score: analysis.health_score,
            risk_level: analysis.risk_level,
            anomalies: analysis.anomalies,
            coaching: coaching.message,
            action_items: coaching.action_items,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::Utc;
    use domain::{BiomarkerReading, MeasurementResult};

    use super::*;
    use crate::ports::{
        MockCoachingGenerator, MockHealthAnalyzer, MockMeasurementProvider, MockNotifier,
    };

    /// Analyzer that never answers
    struct StalledAnalyzer;

    #[async_trait]
    impl HealthAnalyzer for StalledAnalyzer {
        async fn analyze_biomarkers(
            &self,
            _ctx: &FlowContext,
            _user_id: &str,
            _readings: &[BiomarkerReading],
        ) -> Result<AnalysisResult, ApplicationError> {
            std::future::pending().await
        }
    }

    fn measurement(session_id: &str) -> MeasurementResult {
        MeasurementResult {
            session_id: session_id.to_string(),
            user_id: "user-001".to_string(),
            device_id: "dev-001".to_string(),
            biomarkers: vec![
                BiomarkerReading::new("blood_glucose", 126.0, "mg/dL"),
                BiomarkerReading::new("cholesterol_total", 240.0, "mg/dL"),
                BiomarkerReading::new("blood_pressure_systolic", 145.0, "mmHg"),
            ],
            completed_at: Utc::now(),
        }
    }

    /// Analyzer double mirroring the production thresholds
    fn analyze(readings: &[BiomarkerReading]) -> AnalysisResult {
        let anomalies: Vec<String> = readings
            .iter()
            .filter(|r| match r.name.as_str() {
                "blood_glucose" => r.value > 125.0,
                "cholesterol_total" => r.value > 200.0,
                "blood_pressure_systolic" => r.value > 140.0,
                _ => false,
            })
            .map(|r| format!("{} 높음: {:.0} {}", r.name, r.value, r.unit))
            .collect();
        let risk_level = match anomalies.len() {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            2 => RiskLevel::High,
            _ => RiskLevel::Critical,
        };
        #[allow(clippy::cast_precision_loss)]
        let health_score = 100.0 - anomalies.len() as f64 * 15.0;
        AnalysisResult {
            health_score,
            risk_level,
            anomalies,
            recommendations: vec!["식이 조절 권장".to_string(), "정기 검진 필요".to_string()],
        }
    }

    fn analysis_with_risk(risk_level: RiskLevel) -> AnalysisResult {
        AnalysisResult {
            health_score: 80.0,
            risk_level,
            anomalies: vec![],
            recommendations: vec!["수분 섭취".to_string()],
        }
    }

    fn coaching_for(analysis: &AnalysisResult) -> CoachingAdvice {
        CoachingAdvice {
            message: format!(
                "건강 점수 {:.0}점입니다. {}개의 주의 항목이 있습니다.",
                analysis.health_score,
                analysis.anomalies.len()
            ),
            action_items: analysis.recommendations.clone(),
            priority: NotificationPriority::for_risk(analysis.risk_level),
        }
    }

    fn provider_ok() -> MockMeasurementProvider {
        let mut mock = MockMeasurementProvider::new();
        mock.expect_get_session_results()
            .times(1)
            .returning(|_, session_id| Ok(measurement(session_id)));
        mock
    }

    fn analyzer_ok() -> MockHealthAnalyzer {
        let mut mock = MockHealthAnalyzer::new();
        mock.expect_analyze_biomarkers()
            .times(1)
            .returning(|_, _, readings| Ok(analyze(readings)));
        mock
    }

    fn coaching_ok() -> MockCoachingGenerator {
        let mut mock = MockCoachingGenerator::new();
        mock.expect_generate_from_analysis()
            .times(1)
            .returning(|_, _, analysis| Ok(coaching_for(analysis)));
        mock
    }

    fn recording_notifier(sent: Arc<Mutex<Vec<Notification>>>) -> MockNotifier {
        let mut mock = MockNotifier::new();
        mock.expect_notify().returning(move |_, notification| {
            sent.lock().unwrap().push(notification.clone());
            Ok(())
        });
        mock
    }

    fn orchestrator(
        provider: MockMeasurementProvider,
        analyzer: MockHealthAnalyzer,
        coaching: MockCoachingGenerator,
        notifier: MockNotifier,
    ) -> HealthFlowOrchestrator {
        HealthFlowOrchestrator::new(
            Arc::new(provider),
            Arc::new(analyzer),
            Arc::new(coaching),
            Arc::new(notifier),
        )
    }

    #[tokio::test]
    async fn anomalous_measurement_runs_full_flow() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let orch = orchestrator(
            provider_ok(),
            analyzer_ok(),
            coaching_ok(),
            recording_notifier(Arc::clone(&sent)),
        );

        let result = orch
            .process_measurement_completed(&FlowContext::new(), "session-001")
            .await
            .unwrap();

        assert_eq!(result.session_id, "session-001");
        assert_eq!(result.user_id, "user-001");
        assert!((result.health_score - 55.0).abs() < f64::EPSILON);
        assert_eq!(result.risk_level, RiskLevel::Critical);
        assert_eq!(result.anomalies.len(), 3);
        assert_eq!(result.coaching, "건강 점수 55점입니다. 3개의 주의 항목이 있습니다.");
        assert_eq!(result.action_items, vec!["식이 조절 권장", "정기 검진 필요"]);

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].priority, NotificationPriority::Urgent);
        assert_eq!(sent[0].title, HEALTH_ALERT_TITLE);
        assert_eq!(sent[0].body, result.coaching);
        assert_eq!(sent[0].user_id, "user-001");
    }

    #[tokio::test]
    async fn notification_priority_follows_risk_level() {
        let cases = [
            (RiskLevel::Low, MEASUREMENT_COMPLETE_TITLE, NotificationPriority::Normal),
            (RiskLevel::Medium, MEASUREMENT_COMPLETE_TITLE, NotificationPriority::Normal),
            (RiskLevel::High, HEALTH_ALERT_TITLE, NotificationPriority::Urgent),
            (RiskLevel::Critical, HEALTH_ALERT_TITLE, NotificationPriority::Urgent),
        ];

        for (risk, title, priority) in cases {
            let mut analyzer = MockHealthAnalyzer::new();
            analyzer
                .expect_analyze_biomarkers()
                .returning(move |_, _, _| Ok(analysis_with_risk(risk)));

            let sent = Arc::new(Mutex::new(Vec::new()));
            let orch = orchestrator(
                provider_ok(),
                analyzer,
                coaching_ok(),
                recording_notifier(Arc::clone(&sent)),
            );

            let result = orch
                .process_measurement_completed(&FlowContext::new(), "session-risk")
                .await
                .unwrap();

            assert_eq!(result.risk_level, risk);
            let sent = sent.lock().unwrap();
            assert_eq!(sent.len(), 1, "{risk}");
            assert_eq!(sent[0].title, title, "{risk}");
            assert_eq!(sent[0].priority, priority, "{risk}");
        }
    }

    #[tokio::test]
    async fn measurement_failure_stops_before_analysis() {
        let mut provider = MockMeasurementProvider::new();
        provider
            .expect_get_session_results()
            .times(1)
            .returning(|_, id| Err(ApplicationError::NotFound(format!("session {id}"))));
        let mut analyzer = MockHealthAnalyzer::new();
        analyzer.expect_analyze_biomarkers().never();
        let mut coaching = MockCoachingGenerator::new();
        coaching.expect_generate_from_analysis().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let err = orchestrator(provider, analyzer, coaching, notifier)
            .process_measurement_completed(&FlowContext::new(), "missing")
            .await
            .unwrap_err();

        assert_eq!(err.failed_step(), Some(FlowStep::FetchMeasurement));
        assert!(err.to_string().starts_with("측정 결과 조회 실패: "));
    }

    #[tokio::test]
    async fn analysis_failure_stops_before_coaching() {
        let mut analyzer = MockHealthAnalyzer::new();
        analyzer
            .expect_analyze_biomarkers()
            .times(1)
            .returning(|_, _, _| Err(ApplicationError::Inference("model unavailable".into())));
        let mut coaching = MockCoachingGenerator::new();
        coaching.expect_generate_from_analysis().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let err = orchestrator(provider_ok(), analyzer, coaching, notifier)
            .process_measurement_completed(&FlowContext::new(), "session-001")
            .await
            .unwrap_err();

        assert_eq!(err.failed_step(), Some(FlowStep::AnalyzeBiomarkers));
        assert!(err.to_string().starts_with("AI 분석 실패: "));
    }

    #[tokio::test]
    async fn coaching_failure_stops_before_notification() {
        let mut coaching = MockCoachingGenerator::new();
        coaching
            .expect_generate_from_analysis()
            .times(1)
            .returning(|_, _, _| Err(ApplicationError::ExternalService("coaching down".into())));
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let err = orchestrator(provider_ok(), analyzer_ok(), coaching, notifier)
            .process_measurement_completed(&FlowContext::new(), "session-001")
            .await
            .unwrap_err();

        assert_eq!(err.failed_step(), Some(FlowStep::GenerateCoaching));
    }

    #[tokio::test]
    async fn notifier_failure_does_not_change_result() {
        let sent = Arc::new(Mutex::new(Vec::new()));
        let expected = orchestrator(
            provider_ok(),
            analyzer_ok(),
            coaching_ok(),
            recording_notifier(sent),
        )
        .process_measurement_completed(&FlowContext::new(), "session-001")
        .await
        .unwrap();

        let mut failing = MockNotifier::new();
        failing
            .expect_notify()
            .times(1)
            .returning(|_, _| Err(ApplicationError::ExternalService("push gateway down".into())));

        let result = orchestrator(provider_ok(), analyzer_ok(), coaching_ok(), failing)
            .process_measurement_completed(&FlowContext::new(), "session-001")
            .await
            .unwrap();

        assert_eq!(result, expected);
    }

    #[tokio::test]
    async fn cancelled_context_invokes_no_collaborator() {
        let mut provider = MockMeasurementProvider::new();
        provider.expect_get_session_results().never();
        let mut analyzer = MockHealthAnalyzer::new();
        analyzer.expect_analyze_biomarkers().never();
        let mut coaching = MockCoachingGenerator::new();
        coaching.expect_generate_from_analysis().never();
        let mut notifier = MockNotifier::new();
        notifier.expect_notify().never();

        let ctx = FlowContext::new();
        ctx.cancellation_handle().cancel();

        let err = orchestrator(provider, analyzer, coaching, notifier)
            .process_measurement_completed(&ctx, "session-001")
            .await
            .unwrap_err();

        assert!(err.is_cancellation());
        assert_eq!(err.failed_step(), Some(FlowStep::FetchMeasurement));
    }

    #[tokio::test]
    async fn deadline_during_analysis_stops_before_coaching() {
        let mut coaching = MockCoachingGenerator::new();
        coaching.expect_generate_from_analysis().never();
        let sent = Arc::new(Mutex::new(Vec::new()));
        let orch = HealthFlowOrchestrator::new(
            Arc::new(provider_ok()),
            Arc::new(StalledAnalyzer),
            Arc::new(coaching),
            Arc::new(recording_notifier(Arc::clone(&sent))),
        );

        let ctx = FlowContext::new().with_timeout(Duration::from_millis(100));
        let err = orch
            .process_measurement_completed(&ctx, "session-001")
            .await
            .unwrap_err();

        assert_eq!(err.failed_step(), Some(FlowStep::AnalyzeBiomarkers));
        assert_eq!(err.to_string(), "AI 분석 실패: Deadline exceeded");
        assert!(err.is_cancellation());
        assert!(sent.lock().unwrap().is_empty());
    }

    #[test]
    fn result_notification_uses_coaching_message() {
        let analysis = analysis_with_risk(RiskLevel::High);
        let coaching = coaching_for(&analysis);

        let notification = result_notification("user-7", &analysis, &coaching);

        assert_eq!(notification.user_id, "user-7");
        assert_eq!(notification.body, coaching.message);
        assert_eq!(notification.priority, NotificationPriority::Urgent);
    }
}
