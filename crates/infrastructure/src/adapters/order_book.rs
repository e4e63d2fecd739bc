//! In-memory order book

use std::collections::HashMap;
use std::sync::Arc;

use application::error::ApplicationError;
use application::flow_context::FlowContext;
use application::ports::OrderCreator;
use async_trait::async_trait;
use chrono::Utc;
use domain::{DomainError, Order, OrderItem};
use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

/// Status of a freshly created order
pub const ORDER_CREATED: &str = "created";

/// In-memory implementation of [`OrderCreator`]
#[derive(Debug, Clone, Default)]
pub struct InMemoryOrderBook {
    orders: Arc<RwLock<HashMap<String, Order>>>,
}

impl InMemoryOrderBook {
    /// Create an empty order book
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an order by ID
    #[must_use]
    pub fn get(&self, order_id: &str) -> Option<Order> {
        self.orders.read().get(order_id).cloned()
    }

    /// All orders placed by a user
    #[must_use]
    pub fn orders_for(&self, user_id: &str) -> Vec<Order> {
        self.orders
            .read()
            .values()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderCreator for InMemoryOrderBook {
    async fn create_order(
        &self,
        _ctx: &FlowContext,
        user_id: &str,
        items: &[OrderItem],
    ) -> Result<Order, ApplicationError> {
        if items.is_empty() {
            return Err(DomainError::ValidationError("order has no items".into()).into());
        }
        if let Some(item) = items.iter().find(|i| i.quantity == 0) {
            return Err(DomainError::InvalidQuantity(item.quantity).into());
        }

        let order = Order {
            order_id: format!("ord-{}", Uuid::new_v4()),
            user_id: user_id.to_string(),
            total_amount: items.iter().map(OrderItem::line_total).sum(),
            status: ORDER_CREATED.to_string(),
            items: items.to_vec(),
            created_at: Utc::now(),
        };

        info!(order_id = %order.order_id, user_id, total = order.total_amount, "Order created");
        self.orders
            .write()
            .insert(order.order_id.clone(), order.clone());
        Ok(order)
    }
}
