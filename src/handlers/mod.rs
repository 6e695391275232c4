pub mod auth;
pub mod customers;
pub mod dashboard;
pub mod health;
pub mod medications;
pub mod orders;

use serde::Serialize;

/// Mutation acknowledgement without a payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
