use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Medication row. `stock` is decremented by order fulfillment; `price` is
/// snapshotted into order items at order time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Medication {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub dosage: Option<String>,
    pub stock: i64,
    pub price: f64,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMedicationRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub dosage: Option<String>,
    pub stock: Option<i64>,
    pub price: Option<f64>,
}

/// Partial update: only supplied fields overwrite existing values. The
/// nullable fields accept an explicit JSON `null` to clear them.
#[derive(Debug, Deserialize)]
pub struct UpdateMedicationRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub dosage: Option<Option<String>>,
    pub stock: Option<i64>,
    pub price: Option<f64>,
}
