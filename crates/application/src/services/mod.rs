//! Application services - Cross-service orchestration flows

mod commerce_flow;
mod data_sharing_flow;
mod health_flow;
mod step;

pub use commerce_flow::{
    CARTRIDGE_BASE_PRICE, CARTRIDGE_PURCHASE_FEATURE, CommerceFlowOrchestrator, PriceQuote,
    PurchaseResult,
};
pub use data_sharing_flow::{
    DataSharingFlowOrchestrator, HEALTH_RECORD_RESOURCE, RECORD_PAGE_SIZE, SHARE_ACTION,
    SharingResult,
};
pub use health_flow::{
    FlowResult, HEALTH_ALERT_TITLE, HealthFlowOrchestrator, MEASUREMENT_COMPLETE_TITLE,
    result_notification,
};
pub use step::{FlowStep, StepOutcome, StepPolicy, best_effort, fatal};
