use chrono::Utc;
use serde::{Deserialize, Serialize};

pub mod jwt;
pub mod middleware;

/// Claims carried by issued bearer tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub iss: String, // Issuer
}

impl Claims {
    pub fn new(username: String, ttl_seconds: i64) -> Self {
        let now = Utc::now();
        let exp = now + chrono::Duration::seconds(ttl_seconds);

        Self {
            sub: username,
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: "pharmacy-api".to_string(),
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}
