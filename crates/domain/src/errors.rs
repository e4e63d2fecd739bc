//! Domain-level errors
//!
//! These are policy violations. They propagate unchanged through the
//! orchestrators so that callers see the violated condition verbatim.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::value_objects::ConsentStatus;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// Consent exists but is not in the active state
    #[error("동의가 활성 상태가 아닙니다: {0}")]
    ConsentNotActive(ConsentStatus),

    /// Consent is active but its validity window has passed
    #[error("동의 기간이 만료되었습니다 (만료 시각: {expires_at})")]
    ConsentExpired { expires_at: DateTime<Utc> },

    /// Subscription tier does not grant the requested feature
    #[error("{} 권한 없음 (현재 구독: {tier})", feature_label(.feature))]
    FeatureAccessDenied { feature: String, tier: String },

    /// Consent is valid but no records fall inside its scope
    #[error("공유 가능한 건강 기록이 없습니다")]
    NoRecordsToShare,

    /// Purchase quantity must be positive
    #[error("구매 수량이 올바르지 않습니다: {0}")]
    InvalidQuantity(u32),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Korean display name of a subscription feature key
///
/// Unknown keys are shown as-is.
#[must_use]
pub fn feature_label(feature: &str) -> &str {
    match feature {
        "basic_measurement" => "기본 측정",
        "measurement_history" => "측정 기록 조회",
        "cartridge_purchase" => "카트리지 구매",
        "data_export" => "데이터 내보내기",
        "multi_device" => "다중 기기 연결",
        "family_sharing" => "가족 공유",
        "ai_coaching" => "AI 코칭",
        "trend_analysis" => "추세 분석",
        "health_score" => "건강 점수",
        "telemedicine" => "원격 진료",
        "medical_matching" => "의료기관 매칭",
        "fhir_integration" => "FHIR 연동",
        other => other,
    }
}

impl DomainError {
    /// Create an access-denied error for a feature gate
    pub fn access_denied(feature: impl Into<String>, tier: impl Into<String>) -> Self {
        Self::FeatureAccessDenied {
            feature: feature.into(),
            tier: tier.into(),
        }
    }
}
