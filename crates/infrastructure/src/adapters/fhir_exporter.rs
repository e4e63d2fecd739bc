//! FHIR R4 bundle exporter
//!
//! Produces a `collection` bundle with one resource per record. The resource
//! type follows the record type; anything unmapped becomes an `Observation`.

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::{ExportedBundle, FhirExporter};
use async_trait::async_trait;
use chrono::SecondsFormat;
use domain::HealthRecordItem;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// FHIR resource types records are exported as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FhirResourceType {
    Observation,
    Condition,
    DiagnosticReport,
    AllergyIntolerance,
    Immunization,
    Procedure,
    MedicationStatement,
}

impl FhirResourceType {
    /// Resource type for a health-record type
    #[must_use]
    pub fn for_record_type(record_type: &str) -> Self {
        match record_type {
            "condition" => Self::Condition,
            "lab_result" | "imaging" => Self::DiagnosticReport,
            "allergy" => Self::AllergyIntolerance,
            "immunization" => Self::Immunization,
            "procedure" => Self::Procedure,
            "medication" => Self::MedicationStatement,
            _ => Self::Observation,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Bundle {
    resource_type: String,
    #[serde(rename = "type")]
    bundle_type: String,
    total: usize,
    entry: Vec<BundleEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
struct BundleEntry {
    resource: Resource,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Resource {
    resource_type: FhirResourceType,
    id: String,
    subject: Reference,
    effective_date_time: String,
    code: CodeableConcept,
}

#[derive(Debug, Serialize, Deserialize)]
struct Reference {
    reference: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct CodeableConcept {
    text: String,
}

/// serde_json implementation of [`FhirExporter`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FhirBundleExporter;

impl FhirBundleExporter {
    /// Create a new exporter
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn bundle(records: &[HealthRecordItem], patient_ref: &str) -> Bundle {
        let entry: Vec<BundleEntry> = records
            .iter()
            .map(|record| BundleEntry {
                resource: Resource {
                    resource_type: FhirResourceType::for_record_type(&record.record_type),
                    id: record.record_id.clone(),
                    subject: Reference {
                        reference: patient_ref.to_string(),
                    },
                    effective_date_time: record
                        .recorded_at
                        .to_rfc3339_opts(SecondsFormat::Secs, true),
                    code: CodeableConcept {
                        text: record.title.clone(),
                    },
                },
            })
            .collect();

        Bundle {
            resource_type: "Bundle".to_string(),
            bundle_type: "collection".to_string(),
            total: entry.len(),
            entry,
        }
    }
}

#[async_trait]
impl FhirExporter for FhirBundleExporter {
    async fn export_bundle(
        &self,
        _ctx: &FlowContext,
        records: &[HealthRecordItem],
        patient_ref: &str,
    ) -> Result<ExportedBundle, ApplicationError> {
        let bundle = Self::bundle(records, patient_ref);
        let resource_count = bundle.entry.len();
        let bundle_json = serde_json::to_string(&bundle)
            .map_err(|e| ApplicationError::Internal(format!("FHIR serialization failed: {e}")))?;

        debug!(patient_ref, resource_count, "FHIR bundle exported");
        Ok(ExportedBundle {
            bundle_json,
            resource_count,
        })
    }
}
