//! Measurement session results

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single biomarker value read from a cartridge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiomarkerReading {
    /// Biomarker identifier (e.g. `blood_glucose`)
    pub name: String,
    /// Measured value
    pub value: f64,
    /// Unit of `value` (e.g. `mg/dL`)
    pub unit: String,
}

impl BiomarkerReading {
    /// Create a new reading
    pub fn new(name: impl Into<String>, value: f64, unit: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value,
            unit: unit.into(),
        }
    }
}

/// Outcome of a completed measurement session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementResult {
    pub session_id: String,
    pub user_id: String,
    pub device_id: String,
    /// Readings in the order the device reported them
    pub biomarkers: Vec<BiomarkerReading>,
    pub completed_at: DateTime<Utc>,
}

impl MeasurementResult {
    /// Look up a reading by biomarker name
    #[must_use]
    pub fn reading(&self, name: &str) -> Option<&BiomarkerReading> {
        self.biomarkers.iter().find(|r| r.name == name)
    }
}
