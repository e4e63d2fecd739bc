//! In-memory consent store

use std::collections::HashMap;
use std::sync::Arc;

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::{Clock, ConsentCheck, ConsentManager, SystemClock};
use async_trait::async_trait;
use domain::ConsentInfo;
use parking_lot::RwLock;
use tracing::debug;

/// In-memory implementation of [`ConsentManager`]
#[derive(Clone)]
pub struct InMemoryConsentStore {
    consents: Arc<RwLock<HashMap<String, ConsentInfo>>>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for InMemoryConsentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryConsentStore")
            .field("consents", &self.consents.read().len())
            .finish_non_exhaustive()
    }
}

impl Default for InMemoryConsentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryConsentStore {
    /// Create an empty store using the system clock
    #[must_use]
    pub fn new() -> Self {
        Self {
            consents: Arc::new(RwLock::new(HashMap::new())),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used by `check_consent`
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Store a consent, replacing any previous version
    pub fn insert(&self, consent: ConsentInfo) {
        self.consents
            .write()
            .insert(consent.consent_id.clone(), consent);
    }
}

#[async_trait]
impl ConsentManager for InMemoryConsentStore {
    async fn check_consent(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
        provider_id: &str,
        scope: &str,
    ) -> Result<ConsentCheck, ApplicationError> {
        let now = self.clock.now();
        let consent_id = self
            .consents
            .read()
            .values()
            .find(|c| {
                c.user_id == user_id
                    && c.provider_id == provider_id
                    && c.covers(scope)
                    && c.is_usable_at(now)
            })
            .map(|c| c.consent_id.clone());

        debug!(user_id, provider_id, scope, granted = consent_id.is_some(), "Consent checked");
        Ok(ConsentCheck {
            granted: consent_id.is_some(),
            consent_id,
        })
    }

    async fn get_consent(
        &self,
        _ctx: &FlowContext,
        consent_id: &str,
    ) -> Result<ConsentInfo, ApplicationError> {
        self.consents
            .read()
            .get(consent_id)
            .cloned()
            .ok_or_else(|| ApplicationError::NotFound(format!("consent {consent_id}")))
    }
}
