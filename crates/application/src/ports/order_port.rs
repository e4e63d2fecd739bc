//! Order creator port

use async_trait::async_trait;
use domain::{Order, OrderItem};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;
use crate::flow_context::FlowContext;

/// Port for creating shop orders
#[cfg_attr(test, automock)]
#[async_trait]
pub trait OrderCreator: Send + Sync {
    /// Create an order; the shop computes the total from the items
    async fn create_order(
        &self,
        ctx: &FlowContext,
        user_id: &str,
        items: &[OrderItem],
    ) -> Result<Order, ApplicationError>;
}
