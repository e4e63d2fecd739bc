//! Rule-based biomarker analyzer
//!
//! Flags readings outside their clinical reference range and grades the
//! session by the number of flags. Stands in for the AI inference service
//! where no model is available.

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::HealthAnalyzer;
use async_trait::async_trait;
use domain::{AnalysisResult, BiomarkerReading, RiskLevel};
use tracing::debug;

/// Score deducted per out-of-range biomarker
const ANOMALY_PENALTY: f64 = 15.0;

/// Reference range for one biomarker
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceRange {
    pub biomarker: &'static str,
    pub low: Option<f64>,
    pub high: Option<f64>,
    /// Korean display name used in anomaly text
    pub label: &'static str,
    pub recommendation: &'static str,
}

impl ReferenceRange {
    fn check(&self, reading: &BiomarkerReading) -> Option<String> {
        if let Some(high) = self.high {
            if reading.value > high {
                return Some(format!(
                    "{} 높음 ({} {}, 기준 {high} 이하)",
                    self.label, reading.value, reading.unit
                ));
            }
        }
        if let Some(low) = self.low {
            if reading.value < low {
                return Some(format!(
                    "{} 낮음 ({} {}, 기준 {low} 이상)",
                    self.label, reading.value, reading.unit
                ));
            }
        }
        None
    }
}

/// Default clinical reference ranges
pub const DEFAULT_RANGES: &[ReferenceRange] = &[
    ReferenceRange {
        biomarker: "blood_glucose",
        low: Some(70.0),
        high: Some(125.0),
        label: "혈당",
        recommendation: "식후 30분 걷기와 정제 탄수화물 줄이기를 권장합니다",
    },
    ReferenceRange {
        biomarker: "hba1c",
        low: None,
        high: Some(6.5),
        label: "당화혈색소",
        recommendation: "3개월 내 당화혈색소 재검사를 권장합니다",
    },
    ReferenceRange {
        biomarker: "cholesterol_total",
        low: None,
        high: Some(200.0),
        label: "총 콜레스테롤",
        recommendation: "포화지방 섭취를 줄이고 유산소 운동을 늘리세요",
    },
    ReferenceRange {
        biomarker: "blood_pressure_systolic",
        low: Some(90.0),
        high: Some(140.0),
        label: "수축기 혈압",
        recommendation: "나트륨 섭취를 줄이고 혈압을 매일 측정하세요",
    },
    ReferenceRange {
        biomarker: "creatinine",
        low: Some(0.7),
        high: Some(1.3),
        label: "크레아티닌",
        recommendation: "충분한 수분 섭취 후 신장 기능 검사를 받아보세요",
    },
    ReferenceRange {
        biomarker: "uric_acid",
        low: Some(3.5),
        high: Some(7.2),
        label: "요산",
        recommendation: "퓨린이 많은 음식과 음주를 줄이세요",
    },
    ReferenceRange {
        biomarker: "hemoglobin",
        low: Some(12.0),
        high: Some(18.0),
        label: "헤모글로빈",
        recommendation: "철분이 풍부한 식단을 유지하세요",
    },
];

/// Threshold-based implementation of [`HealthAnalyzer`]
#[derive(Debug, Clone)]
pub struct ThresholdHealthAnalyzer {
    ranges: Vec<ReferenceRange>,
}

impl Default for ThresholdHealthAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_RANGES.to_vec())
    }
}

impl ThresholdHealthAnalyzer {
    /// Create an analyzer over custom reference ranges
    #[must_use]
    pub fn new(ranges: Vec<ReferenceRange>) -> Self {
        Self { ranges }
    }

    /// Risk grade for a number of anomalies
    #[must_use]
    pub const fn risk_for(anomaly_count: usize) -> RiskLevel {
        match anomaly_count {
            0 => RiskLevel::Low,
            1 => RiskLevel::Medium,
            2 => RiskLevel::High,
            _ => RiskLevel::Critical,
        }
    }

    /// Health score for a number of anomalies, floored at zero
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn score_for(anomaly_count: usize) -> f64 {
        ANOMALY_PENALTY.mul_add(-(anomaly_count as f64), 100.0).max(0.0)
    }

    /// Analyze readings without a request context
    #[must_use]
    pub fn evaluate(&self, readings: &[BiomarkerReading]) -> AnalysisResult {
        let mut anomalies = Vec::new();
        let mut recommendations = Vec::new();

        for reading in readings {
            let Some(range) = self.ranges.iter().find(|r| r.biomarker == reading.name) else {
                continue;
            };
            if let Some(anomaly) = range.check(reading) {
                anomalies.push(anomaly);
                recommendations.push(range.recommendation.to_string());
            }
        }

        if recommendations.is_empty() {
            recommendations.push("현재 건강 상태를 잘 유지하고 있습니다".to_string());
        }

        AnalysisResult {
            health_score: Self::score_for(anomalies.len()),
            risk_level: Self::risk_for(anomalies.len()),
            anomalies,
            recommendations,
        }
    }
}

#[async_trait]
impl HealthAnalyzer for ThresholdHealthAnalyzer {
    async fn analyze_biomarkers(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
        readings: &[BiomarkerReading],
    ) -> Result<AnalysisResult, ApplicationError> {
        if readings.is_empty() {
            return Err(ApplicationError::Inference(
                "no biomarker readings to analyze".into(),
            ));
        }

        let analysis = self.evaluate(readings);
        debug!(
            user_id,
            score = analysis.health_score,
            risk = %analysis.risk_level,
            anomalies = analysis.anomalies.len(),
            "Biomarkers analyzed"
        );
        Ok(analysis)
    }
}
