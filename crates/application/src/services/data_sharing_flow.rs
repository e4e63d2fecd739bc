//! Consent-gated data sharing flow
//!
//! Exports a patient's health records to a third-party provider as a FHIR
//! bundle, but only under an active, unexpired consent. The access is
//! audited on a best-effort basis.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use domain::DomainError;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;
use crate::ports::{
    AccessAuditLogger, AccessLogEntry, Clock, ConsentManager, FhirExporter, RecordProvider,
    SystemClock,
};
use crate::services::step::{FlowStep, best_effort, fatal};

/// Maximum number of records exported in one share
pub const RECORD_PAGE_SIZE: usize = 100;

/// Audit action recorded for a share
pub const SHARE_ACTION: &str = "share";

/// Audit resource type recorded for a share
pub const HEALTH_RECORD_RESOURCE: &str = "health_record";

/// Final result of a data share
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SharingResult {
    pub consent_id: String,
    pub provider_id: String,
    /// Serialized FHIR bundle
    pub bundle_json: String,
    /// Resources in the bundle
    pub resource_count: usize,
    /// Records fed into the export
    pub record_count: usize,
    pub shared_at: DateTime<Utc>,
}

/// Coordinates consent, health-record and audit services
pub struct DataSharingFlowOrchestrator {
    consent_manager: Arc<dyn ConsentManager>,
    record_provider: Arc<dyn RecordProvider>,
    fhir_exporter: Arc<dyn FhirExporter>,
    audit_logger: Arc<dyn AccessAuditLogger>,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for DataSharingFlowOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataSharingFlowOrchestrator")
            .finish_non_exhaustive()
    }
}

impl DataSharingFlowOrchestrator {
    /// Create a new data-sharing orchestrator using the system clock
    pub fn new(
        consent_manager: Arc<dyn ConsentManager>,
        record_provider: Arc<dyn RecordProvider>,
        fhir_exporter: Arc<dyn FhirExporter>,
        audit_logger: Arc<dyn AccessAuditLogger>,
    ) -> Self {
        Self {
            consent_manager,
            record_provider,
            fhir_exporter,
            audit_logger,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used for expiry checks and timestamps
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Share the records covered by a consent with its provider
    #[instrument(skip(self, ctx), fields(request_id = %ctx.request_id()))]
    pub async fn share_data(
        &self,
        ctx: &FlowContext,
        consent_id: &str,
    ) -> Result<SharingResult, ApplicationError> {
        info!("Starting data share");

        let consent = fatal(
            FlowStep::LoadConsent,
            ctx.run(|| self.consent_manager.get_consent(ctx, consent_id))
                .await,
        )?;
        consent
            .ensure_usable_at(self.clock.now())
            .inspect_err(|e| warn!(error = %e, "Consent rejected"))?;
        debug!(
            user_id = %consent.user_id,
            provider_id = %consent.provider_id,
            scope = ?consent.scope,
            "Consent verified"
        );

        let records = fatal(
            FlowStep::FetchRecords,
            ctx.run(|| {
                self.record_provider.get_records_by_scope(
                    ctx,
                    &consent.user_id,
                    &consent.scope,
                    RECORD_PAGE_SIZE,
                )
            })
            .await,
        )?;
        if records.is_empty() {
            return Err(DomainError::NoRecordsToShare.into());
        }
        debug!(count = records.len(), "Records fetched");

        let patient_ref = consent.patient_reference();
        let bundle = fatal(
            FlowStep::ExportBundle,
            ctx.run(|| self.fhir_exporter.export_bundle(ctx, &records, &patient_ref))
                .await,
        )?;

        let entry = AccessLogEntry {
            user_id: consent.user_id.clone(),
            provider_id: consent.provider_id.clone(),
            action: SHARE_ACTION.to_string(),
            resource_type: HEALTH_RECORD_RESOURCE.to_string(),
            resource_ids: records.iter().map(|r| r.record_id.clone()).collect(),
        };
        best_effort(
            FlowStep::LogAccess,
            ctx.run(|| self.audit_logger.log_access(ctx, &entry)).await,
        );

        info!(
            provider_id = %consent.provider_id,
            resources = bundle.resource_count,
            records = records.len(),
            "Data share completed"
        );

        Ok(SharingResult {
            consent_id: consent_id.to_string(),
            provider_id: consent.provider_id,
            bundle_json: bundle.bundle_json,
            resource_count: bundle.resource_count,
            record_count: records.len(),
            shared_at: self.clock.now(),
        })
    }
}
