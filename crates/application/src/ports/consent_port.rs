//! Consent manager port

use async_trait::async_trait;
use domain::ConsentInfo;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Outcome of a consent lookup by user, provider and scope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsentCheck {
    pub granted: bool,
    /// Matching consent, when one was found
    pub consent_id: Option<String>,
}

/// Port for data-sharing consents
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ConsentManager: Send + Sync {
    /// Check whether a usable consent covers `scope` for the provider
    async fn check_consent(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        provider_id: &str,
        scope: &str,
    ) -> Result<ConsentCheck, ApplicationError>;

    /// Load a consent by ID
    async fn get_consent(
        &self,
        ctx: &FlowContext,
        consent_id: &str,
    ) -> Result<ConsentInfo, ApplicationError>;
}
