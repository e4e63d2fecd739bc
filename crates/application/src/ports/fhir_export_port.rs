//! FHIR exporter port

use async_trait::async_trait;
use domain::HealthRecordItem;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// A serialized FHIR bundle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportedBundle {
    pub bundle_json: String,
    /// Number of FHIR resources in the bundle
    pub resource_count: usize,
}

/// Port for exporting records as a FHIR bundle
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FhirExporter: Send + Sync {
    /// Export `records` as a bundle whose resources reference `patient_ref`
    async fn export_bundle(
        &self,
        ctx: &FlowContext,
        records: &[HealthRecordItem],
        patient_ref: &str,
    ) -> Result<ExportedBundle, ApplicationError>;
}
