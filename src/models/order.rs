use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Order header joined with the owning customer's name.
///
/// `status` is a free-form string; the known values are pending, processing,
/// completed and cancelled, but the set is open.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderRecord {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub total_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Order line joined with the medication's name. `unit_price` is the price
/// snapshot taken at order time, not the medication's current price.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct OrderItemRecord {
    pub id: i64,
    pub order_id: i64,
    pub medication_id: i64,
    pub medication_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
}

/// Fully hydrated order as returned by the API.
#[derive(Debug, Clone, Serialize)]
pub struct OrderDetails {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}

#[derive(Debug, Deserialize)]
pub struct OrderLineRequest {
    pub medication_id: Option<i64>,
    pub quantity: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: Option<i64>,
    #[serde(default)]
    pub items: Vec<OrderLineRequest>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: Option<String>,
}
