//! Demo wiring of the in-memory collaborators
//!
//! `seed` fills every store with a small, consistent data set owned by the
//! configured demo user, and the returned bundle builds the three
//! orchestrators over it.

use std::sync::Arc;

use application::{CommerceFlowOrchestrator, DataSharingFlowOrchestrator, HealthFlowOrchestrator};
use chrono::{Duration, Utc};
use domain::{
    BiomarkerReading, ConsentInfo, ConsentStatus, HealthRecordItem, MeasurementResult,
    SubscriptionTier,
};
use tracing::info;

use crate::adapters::{
    FhirBundleExporter, InMemoryAccessAuditLog, InMemoryConsentStore, InMemoryMeasurementStore,
    InMemoryOrderBook, InMemoryRecordStore, InMemorySubscriptionStore, RecordingNotifier,
    SimulatedPaymentGateway, TemplateCoachingGenerator, ThresholdHealthAnalyzer,
};
use crate::config::DemoConfig;

/// Completed measurement session
pub const DEMO_SESSION_ID: &str = "session-demo-001";

/// Cartridge product offered in the demo shop
pub const DEMO_PRODUCT_ID: &str = "cartridge-glucose-10";

/// Active consent covering vital signs and lab results
pub const ACTIVE_CONSENT_ID: &str = "consent-demo-active";

/// Consent whose expiry has passed
pub const EXPIRED_CONSENT_ID: &str = "consent-demo-expired";

/// Consent the user withdrew
pub const REVOKED_CONSENT_ID: &str = "consent-demo-revoked";

/// Every in-memory collaborator, sharing state with the orchestrators built from it
#[derive(Debug, Clone, Default)]
pub struct DemoCollaborators {
    pub measurements: InMemoryMeasurementStore,
    pub analyzer: ThresholdHealthAnalyzer,
    pub coaching: TemplateCoachingGenerator,
    pub notifier: RecordingNotifier,
    pub subscriptions: InMemorySubscriptionStore,
    pub orders: InMemoryOrderBook,
    pub payments: SimulatedPaymentGateway,
    pub consents: InMemoryConsentStore,
    pub records: InMemoryRecordStore,
    pub exporter: FhirBundleExporter,
    pub audit_log: InMemoryAccessAuditLog,
}

impl DemoCollaborators {
    /// Health-measurement orchestrator over these collaborators
    #[must_use]
    pub fn health_flow(&self) -> HealthFlowOrchestrator {
        HealthFlowOrchestrator::new(
            Arc::new(self.measurements.clone()),
            Arc::new(self.analyzer.clone()),
            Arc::new(self.coaching),
            Arc::new(self.notifier.clone()),
        )
    }

    /// Commerce orchestrator over these collaborators
    #[must_use]
    pub fn commerce_flow(&self) -> CommerceFlowOrchestrator {
        CommerceFlowOrchestrator::new(
            Arc::new(self.subscriptions.clone()),
            Arc::new(self.orders.clone()),
            Arc::new(self.payments.clone()),
        )
    }

    /// Data-sharing orchestrator over these collaborators
    #[must_use]
    pub fn data_sharing_flow(&self) -> DataSharingFlowOrchestrator {
        DataSharingFlowOrchestrator::new(
            Arc::new(self.consents.clone()),
            Arc::new(self.records.clone()),
            Arc::new(self.exporter),
            Arc::new(self.audit_log.clone()),
        )
    }
}

/// Build collaborators seeded with demo data for `config.user_id`
#[must_use]
pub fn seed(config: &DemoConfig) -> DemoCollaborators {
    let collaborators = DemoCollaborators::default();
    let user_id = config.user_id.as_str();
    let now = Utc::now();

    collaborators.measurements.insert(MeasurementResult {
        session_id: DEMO_SESSION_ID.to_string(),
        user_id: user_id.to_string(),
        device_id: "reader-demo-01".to_string(),
        biomarkers: vec![
            BiomarkerReading::new("blood_glucose", 142.0, "mg/dL"),
            BiomarkerReading::new("hba1c", 5.9, "%"),
            BiomarkerReading::new("cholesterol_total", 215.0, "mg/dL"),
            BiomarkerReading::new("blood_pressure_systolic", 128.0, "mmHg"),
        ],
        completed_at: now - Duration::minutes(2),
    });

    collaborators.subscriptions.subscribe(
        user_id,
        SubscriptionTier::parse(&config.tier).unwrap_or_default(),
    );

    let consent = |consent_id: &str, status, expires_at| ConsentInfo {
        consent_id: consent_id.to_string(),
        user_id: user_id.to_string(),
        provider_id: config.provider_id.clone(),
        scope: vec!["vital_sign".to_string(), "lab_result".to_string()],
        status,
        expires_at,
    };
    collaborators.consents.insert(consent(
        ACTIVE_CONSENT_ID,
        ConsentStatus::Active,
        now + Duration::days(180),
    ));
    collaborators.consents.insert(consent(
        EXPIRED_CONSENT_ID,
        ConsentStatus::Active,
        now - Duration::days(1),
    ));
    collaborators.consents.insert(consent(
        REVOKED_CONSENT_ID,
        ConsentStatus::Revoked,
        now + Duration::days(180),
    ));

    let records = [
        ("rec-bp-001", "vital_sign", "혈압 측정", 3),
        ("rec-glu-001", "vital_sign", "공복 혈당", 2),
        ("rec-lab-001", "lab_result", "지질 패널 검사", 10),
        ("rec-img-001", "imaging", "흉부 X선", 30),
    ];
    for (record_id, record_type, title, age_days) in records {
        collaborators.records.insert(
            user_id,
            HealthRecordItem {
                record_id: record_id.to_string(),
                record_type: record_type.to_string(),
                title: title.to_string(),
                data_json: "{}".to_string(),
                recorded_at: now - Duration::days(age_days),
            },
        );
    }

    info!(user_id, tier = %config.tier, "Demo collaborators seeded");
    collaborators
}
