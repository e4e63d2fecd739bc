//! Orders and payments

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A line item to be ordered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: String,
    pub quantity: u32,
    /// Unit price after discounts
    pub price: f64,
}

impl OrderItem {
    /// Price of the whole line
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// An order created by the shop service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,
    pub user_id: String,
    pub total_amount: f64,
    pub status: String,
    pub items: Vec<OrderItem>,
    pub created_at: DateTime<Utc>,
}

/// Outcome of charging an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub payment_id: String,
    pub order_id: String,
    pub status: String,
    pub amount: f64,
    pub paid_at: DateTime<Utc>,
}
