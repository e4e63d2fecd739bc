//! Payment processor port

use async_trait::async_trait;
use domain::PaymentResult;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// A request to charge an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub order_id: String,
    pub user_id: String,
    pub amount: f64,
    /// Payment method name (e.g. `card`, `kakao_pay`)
    pub method: String,
}

/// Port for charging orders
#[cfg_attr(test, automock)]
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// Charge an order
    async fn process_payment(
        &self,
        ctx: &FlowContext,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, ApplicationError>;
}
