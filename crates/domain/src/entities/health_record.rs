//! Health record items eligible for sharing

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored health record as exposed to the sharing flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecordItem {
    pub record_id: String,
    /// Record type used for consent scoping (e.g. `vital_sign`, `lab_result`)
    pub record_type: String,
    pub title: String,
    /// Opaque JSON payload owned by the health-record service
    pub data_json: String,
    pub recorded_at: DateTime<Utc>,
}
