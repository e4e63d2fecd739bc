//! Simulated payment gateway
//!
//! Approves any positive charge made with a supported method.

use std::collections::HashMap;
use std::sync::Arc;

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::{PaymentProcessor, PaymentRequest};
use async_trait::async_trait;
use chrono::Utc;
use domain::PaymentResult;
use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

/// Payment methods the gateway accepts
pub const SUPPORTED_METHODS: &[&str] = &["card", "bank_transfer", "kakao_pay", "naver_pay"];

/// Status of an approved payment
pub const PAYMENT_COMPLETED: &str = "completed";

/// Simulated implementation of [`PaymentProcessor`]
#[derive(Debug, Clone, Default)]
pub struct SimulatedPaymentGateway {
    payments: Arc<RwLock<HashMap<String, PaymentResult>>>,
}

impl SimulatedPaymentGateway {
    /// Create a new gateway
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Payments approved so far
    #[must_use]
    pub fn payments(&self) -> Vec<PaymentResult> {
        self.payments.read().values().cloned().collect()
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedPaymentGateway {
    async fn process_payment(
        &self,
        _ctx: &FlowContext,
        request: &PaymentRequest,
    ) -> Result<PaymentResult, ApplicationError> {
        if !SUPPORTED_METHODS.contains(&request.method.as_str()) {
            warn!(method = %request.method, "Unsupported payment method");
            return Err(ApplicationError::ExternalService(format!(
                "unsupported payment method: {}",
                request.method
            )));
        }
        if request.amount <= 0.0 || !request.amount.is_finite() {
            return Err(ApplicationError::ExternalService(format!(
                "invalid payment amount: {}",
                request.amount
            )));
        }

        let payment = PaymentResult {
            payment_id: format!("pay-{}", Uuid::new_v4()),
            order_id: request.order_id.clone(),
            status: PAYMENT_COMPLETED.to_string(),
            amount: request.amount,
            paid_at: Utc::now(),
        };

        info!(
            payment_id = %payment.payment_id,
            order_id = %payment.order_id,
            amount = payment.amount,
            "Payment approved"
        );
        self.payments
            .write()
            .insert(payment.payment_id.clone(), payment.clone());
        Ok(payment)
    }
}
