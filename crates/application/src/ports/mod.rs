//! Port definitions for application layer
//!
//! Ports are the narrow capability interfaces the orchestrators depend on.
//! Each collaborating service (or a test double) implements one of them;
//! adapters in the infrastructure layer provide in-memory implementations.

mod access_audit_port;
mod clock;
mod coaching_port;
mod consent_port;
mod fhir_export_port;
mod health_analyzer_port;
mod measurement_port;
mod notifier_port;
mod order_port;
mod payment_port;
mod record_port;
mod subscription_port;

#[cfg(test)]
pub use access_audit_port::MockAccessAuditLogger;
pub use access_audit_port::{AccessAuditLogger, AccessLogEntry};
pub use clock::{Clock, FixedClock, SystemClock};
pub use coaching_port::CoachingGenerator;
#[cfg(test)]
pub use coaching_port::MockCoachingGenerator;
#[cfg(test)]
pub use consent_port::MockConsentManager;
pub use consent_port::{ConsentCheck, ConsentManager};
#[cfg(test)]
pub use fhir_export_port::MockFhirExporter;
pub use fhir_export_port::{ExportedBundle, FhirExporter};
pub use health_analyzer_port::HealthAnalyzer;
#[cfg(test)]
pub use health_analyzer_port::MockHealthAnalyzer;
pub use measurement_port::MeasurementProvider;
#[cfg(test)]
pub use measurement_port::MockMeasurementProvider;
#[cfg(test)]
pub use notifier_port::MockNotifier;
pub use notifier_port::{Notification, Notifier};
#[cfg(test)]
pub use order_port::MockOrderCreator;
pub use order_port::OrderCreator;
#[cfg(test)]
pub use payment_port::MockPaymentProcessor;
pub use payment_port::{PaymentProcessor, PaymentRequest};
#[cfg(test)]
pub use record_port::MockRecordProvider;
pub use record_port::RecordProvider;
#[cfg(test)]
pub use subscription_port::MockSubscriptionChecker;
pub use subscription_port::{FeatureAccess, SubscriptionChecker};
