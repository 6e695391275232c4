pub mod customer;
pub mod medication;
pub mod order;

use serde::{Deserialize, Deserializer};

/// Deserializer for nullable fields in partial-update payloads: an absent
/// field stays `None` (keep the current value), an explicit JSON `null`
/// becomes `Some(None)` (clear it).
pub(crate) fn double_option<'de, T, D>(
    deserializer: D,
) -> std::result::Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

pub use customer::{CreateCustomerRequest, Customer, UpdateCustomerRequest};
pub use medication::{CreateMedicationRequest, Medication, UpdateMedicationRequest};
pub use order::{
    CreateOrderRequest, OrderDetails, OrderItemRecord, OrderLineRequest, OrderRecord,
    UpdateOrderStatusRequest,
};
