//! Cartridge commerce flow
//!
//! Gates a cartridge purchase on the buyer's subscription, prices it by tier,
//! then creates the order and charges it. Every step is fatal.
//!
//! An order created before a failed payment stays in the `created` state;
//! no compensating cancellation is issued.

use std::fmt;
use std::sync::Arc;

use domain::{DomainError, OrderItem, tier_discount};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;
use crate::ports::{OrderCreator, PaymentProcessor, PaymentRequest, SubscriptionChecker};
use crate::services::step::{FlowStep, fatal};

/// Feature gate checked before any purchase
pub const CARTRIDGE_PURCHASE_FEATURE: &str = "cartridge_purchase";

/// List price of one cartridge in KRW
pub const CARTRIDGE_BASE_PRICE: f64 = 29_900.0;

/// Tier-based unit price for a cartridge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceQuote {
    /// Discount as a fraction (0.0 to 0.30)
    pub discount_rate: f64,
    /// Unit price after discount
    pub unit_price: f64,
}

impl PriceQuote {
    /// Price one cartridge for a tier name
    #[must_use]
    pub fn for_tier(tier: &str) -> Self {
        let discount_rate = tier_discount(tier);
        Self {
            discount_rate,
            unit_price: CARTRIDGE_BASE_PRICE * (1.0 - discount_rate),
        }
    }

    /// Discount as a percentage, the way it is shown to users
    #[must_use]
    pub fn discount_percent(&self) -> f64 {
        self.discount_rate * 100.0
    }
}

/// Final result of a purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseResult {
    pub order_id: String,
    pub payment_id: String,
    /// Amount actually charged
    pub amount: f64,
    /// Discount percentage applied (e.g. `15.0`)
    pub discount: f64,
    pub tier: String,
    /// Payment status reported by the processor
    pub status: String,
}

/// Coordinates subscription, shop and payment services
pub struct CommerceFlowOrchestrator {
    subscription_checker: Arc<dyn SubscriptionChecker>,
    order_creator: Arc<dyn OrderCreator>,
    payment_processor: Arc<dyn PaymentProcessor>,
}

impl fmt::Debug for CommerceFlowOrchestrator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommerceFlowOrchestrator")
            .finish_non_exhaustive()
    }
}

impl CommerceFlowOrchestrator {
    /// Create a new commerce orchestrator
    pub fn new(
        subscription_checker: Arc<dyn SubscriptionChecker>,
        order_creator: Arc<dyn OrderCreator>,
        payment_processor: Arc<dyn PaymentProcessor>,
    ) -> Self {
        Self {
            subscription_checker,
            order_creator,
            payment_processor,
        }
    }

    /// Purchase cartridges for a user
    #[instrument(skip(self, ctx, payment_method), fields(request_id = %ctx.request_id()))]
    pub async fn purchase_cartridge(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        product_id: &str,
        quantity: u32,
        payment_method: &str,
    ) -> Result<PurchaseResult, ApplicationError> {
        if quantity == 0 {
            return Err(DomainError::InvalidQuantity(quantity).into());
        }
        info!("Starting cartridge purchase");

        let access = fatal(
            FlowStep::CheckSubscription,
            ctx.run(|| {
                self.subscription_checker
                    .check_feature_access(ctx, user_id, CARTRIDGE_PURCHASE_FEATURE)
            })
            .await,
        )?;
        if !access.granted {
            warn!(tier = %access.tier, "Cartridge purchase denied by subscription");
            return Err(DomainError::access_denied(CARTRIDGE_PURCHASE_FEATURE, access.tier).into());
        }

        let quote = PriceQuote::for_tier(&access.tier);
        debug!(
            tier = %access.tier,
            discount_rate = quote.discount_rate,
            unit_price = quote.unit_price,
            "Subscription verified"
        );

        let items = [OrderItem {
            product_id: product_id.to_string(),
            quantity,
            price: quote.unit_price,
        }];
        let order = fatal(
            FlowStep::CreateOrder,
            ctx.run(|| self.order_creator.create_order(ctx, user_id, &items))
                .await,
        )?;
        debug!(order_id = %order.order_id, total = order.total_amount, "Order created");

        let request = PaymentRequest {
            order_id: order.order_id.clone(),
            user_id: user_id.to_string(),
            amount: order.total_amount,
            method: payment_method.to_string(),
        };
        let payment = fatal(
            FlowStep::ProcessPayment,
            ctx.run(|| self.payment_processor.process_payment(ctx, &request))
                .await,
        )
        .inspect_err(|e| {
            warn!(order_id = %order.order_id, error = %e, "Payment failed; order left in created state");
        })?;

        info!(
            order_id = %order.order_id,
            payment_id = %payment.payment_id,
            status = %payment.status,
            "Cartridge purchase completed"
        );

        Ok(PurchaseResult {
            order_id: order.order_id,
            payment_id: payment.payment_id,
            amount: payment.amount,
            discount: quote.discount_percent(),
            tier: access.tier,
            status: payment.status,
        })
    }
}
