//! AI analysis output and the coaching advice derived from it

use serde::{Deserialize, Serialize};

use crate::value_objects::{NotificationPriority, RiskLevel};

/// Result of running the health analyzer over a set of readings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Nominally 0-100. Not clamped here; the analyzer owns the scale.
    pub health_score: f64,
    pub risk_level: RiskLevel,
    /// Human-readable description of each detected anomaly
    pub anomalies: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisResult {
    /// Whether the analyzer detected any anomaly
    #[must_use]
    pub fn has_anomalies(&self) -> bool {
        !self.anomalies.is_empty()
    }
}

/// Coaching produced from an analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachingAdvice {
    pub message: String,
    /// Ordered list of concrete actions for the user
    pub action_items: Vec<String>,
    pub priority: NotificationPriority,
}
