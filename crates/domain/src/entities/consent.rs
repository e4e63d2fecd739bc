//! Data-sharing consent

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;
use crate::value_objects::ConsentStatus;

/// Consent granted by a user to share records with a provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsentInfo {
    pub consent_id: String,
    pub user_id: String,
    pub provider_id: String,
    /// Record types the consent covers
    pub scope: Vec<String>,
    pub status: ConsentStatus,
    pub expires_at: DateTime<Utc>,
}

impl ConsentInfo {
    /// Verify the consent can be used at `now`
    ///
    /// Status is checked before expiry. A consent is usable only if it is
    /// active and `now` is strictly before `expires_at`.
    pub fn ensure_usable_at(&self, now: DateTime<Utc>) -> Result<(), DomainError> {
        if self.status != ConsentStatus::Active {
            return Err(DomainError::ConsentNotActive(self.status));
        }
        if now >= self.expires_at {
            return Err(DomainError::ConsentExpired {
                expires_at: self.expires_at,
            });
        }
        Ok(())
    }

    /// Whether the consent can be used at `now`
    #[must_use]
    pub fn is_usable_at(&self, now: DateTime<Utc>) -> bool {
        self.ensure_usable_at(now).is_ok()
    }

    /// Whether `record_type` falls inside the consent scope
    #[must_use]
    pub fn covers(&self, record_type: &str) -> bool {
        self.scope.iter().any(|s| s == record_type)
    }

    /// FHIR reference to the consenting patient
    #[must_use]
    pub fn patient_reference(&self) -> String {
        format!("Patient/{}", self.user_id)
    }
}
