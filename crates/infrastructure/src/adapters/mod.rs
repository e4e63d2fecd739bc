//! Infrastructure adapters
//!
//! In-process collaborators implementing every application port. They back
//! the CLI and the end-to-end tests, and serve as reference behavior for the
//! networked service clients.

mod access_audit_log;
mod coaching_generator;
mod consent_store;
mod fhir_exporter;
mod measurement_store;
mod order_book;
mod payment_gateway;
mod record_store;
mod recording_notifier;
mod subscription_store;
mod threshold_analyzer;

pub use access_audit_log::{InMemoryAccessAuditLog, RecordedAccess};
pub use coaching_generator::TemplateCoachingGenerator;
pub use consent_store::InMemoryConsentStore;
pub use fhir_exporter::{FhirBundleExporter, FhirResourceType};
pub use measurement_store::InMemoryMeasurementStore;
pub use order_book::{InMemoryOrderBook, ORDER_CREATED};
pub use payment_gateway::{PAYMENT_COMPLETED, SUPPORTED_METHODS, SimulatedPaymentGateway};
pub use record_store::InMemoryRecordStore;
pub use recording_notifier::RecordingNotifier;
pub use subscription_store::{FEATURE_REQUIREMENTS, InMemorySubscriptionStore};
pub use threshold_analyzer::{DEFAULT_RANGES, ReferenceRange, ThresholdHealthAnalyzer};
