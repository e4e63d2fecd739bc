//! Step policy for orchestration flows
//!
//! Every step is either fatal (its failure aborts the flow and is returned
//! to the caller) or best-effort (its failure is logged and the flow
//! continues). The classification is fixed per step and cannot be changed
//! at call time.

use std::fmt;

use tracing::warn;

use crate::error::ApplicationError;

/// How a step's failure affects the rest of the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepPolicy {
    /// Abort the flow and return the error
    Fatal,
    /// Log the error and continue
    BestEffort,
}

/// A single collaborator call inside an orchestration flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowStep {
    /// Load the completed measurement session
    FetchMeasurement,
    /// Run AI analysis over the biomarkers
    AnalyzeBiomarkers,
    /// Generate coaching from the analysis
    GenerateCoaching,
    /// Push the result notification
    SendNotification,
    /// Check subscription feature access
    CheckSubscription,
    /// Create the shop order
    CreateOrder,
    /// Charge the order
    ProcessPayment,
    /// Load the data-sharing consent
    LoadConsent,
    /// Fetch the records covered by the consent
    FetchRecords,
    /// Export the records as a FHIR bundle
    ExportBundle,
    /// Write the data-access audit entry
    LogAccess,
}

impl FlowStep {
    /// Stable identifier used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::FetchMeasurement => "fetch_measurement",
            Self::AnalyzeBiomarkers => "analyze_biomarkers",
            Self::GenerateCoaching => "generate_coaching",
            Self::SendNotification => "send_notification",
            Self::CheckSubscription => "check_subscription",
            Self::CreateOrder => "create_order",
            Self::ProcessPayment => "process_payment",
            Self::LoadConsent => "load_consent",
            Self::FetchRecords => "fetch_records",
            Self::ExportBundle => "export_bundle",
            Self::LogAccess => "log_access",
        }
    }

    /// User-facing prefix for errors raised by this step
    #[must_use]
    pub const fn failure_label(&self) -> &'static str {
        match self {
            Self::FetchMeasurement => "측정 결과 조회 실패",
            Self::AnalyzeBiomarkers => "AI 분석 실패",
            Self::GenerateCoaching => "코칭 생성 실패",
            Self::SendNotification => "알림 전송 실패",
            Self::CheckSubscription => "구독 확인 실패",
            Self::CreateOrder => "주문 생성 실패",
            Self::ProcessPayment => "결제 실패",
            Self::LoadConsent => "동의 정보 조회 실패",
            Self::FetchRecords => "건강 기록 조회 실패",
            Self::ExportBundle => "FHIR 번들 생성 실패",
            Self::LogAccess => "접근 로그 기록 실패",
        }
    }

    /// Failure policy of this step
    #[must_use]
    pub const fn policy(&self) -> StepPolicy {
        match self {
            Self::SendNotification | Self::LogAccess => StepPolicy::BestEffort,
            _ => StepPolicy::Fatal,
        }
    }
}

impl fmt::Display for FlowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.failure_label())
    }
}

/// Result of a best-effort step
#[derive(Debug)]
pub enum StepOutcome {
    /// The step succeeded
    Completed,
    /// The step failed and the flow continued without it
    Skipped(ApplicationError),
}

impl StepOutcome {
    /// Whether the step succeeded
    #[must_use]
    pub const fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Apply the fatal policy: wrap the error with the step that produced it
pub fn fatal<T>(step: FlowStep, result: Result<T, ApplicationError>) -> Result<T, ApplicationError> {
    debug_assert_eq!(step.policy(), StepPolicy::Fatal, "{} is best-effort", step.name());
    result.map_err(|e| ApplicationError::at_step(step, e))
}

/// Apply the best-effort policy: log a failure and carry on
pub fn best_effort(step: FlowStep, result: Result<(), ApplicationError>) -> StepOutcome {
    debug_assert_eq!(step.policy(), StepPolicy::BestEffort, "{} is fatal", step.name());
    match result {
        Ok(()) => StepOutcome::Completed,
        Err(e) => {
            warn!(step = step.name(), error = %e, "{} (non-fatal)", step.failure_label());
            StepOutcome::Skipped(e)
        },
    }
}
