use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCustomerRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Partial update: only supplied fields overwrite existing values. The
/// nullable fields accept an explicit JSON `null` to clear them.
#[derive(Debug, Deserialize)]
pub struct UpdateCustomerRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub email: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub address: Option<Option<String>>,
}
