//! Domain entities - Request-scoped values produced by collaborator services

mod analysis;
mod commerce;
mod consent;
mod health_record;
mod measurement;

pub use analysis::{AnalysisResult, CoachingAdvice};
pub use commerce::{Order, OrderItem, PaymentResult};
pub use consent::ConsentInfo;
pub use health_record::HealthRecordItem;
pub use measurement::{BiomarkerReading, MeasurementResult};
