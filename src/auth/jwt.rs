use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use super::Claims;
use crate::error::{ApiError, Result};

/// HS256 token issuance and verification.
///
/// Leeway is zero so a token is rejected the moment its `exp` passes.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_seconds: i64,
    validation: Validation,
}

impl JwtService {
    pub fn new(secret: &str, expiration_seconds: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&["pharmacy-api"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expiration_seconds,
            validation,
        }
    }

    /// Issue a token for the given subject, expiring after the configured
    /// lifetime.
    pub fn issue_token(&self, username: &str) -> Result<String> {
        let claims = Claims::new(username.to_string(), self.expiration_seconds);
        self.encode_token(&claims)
    }

    pub fn encode_token(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| ApiError::Internal(format!("Failed to sign token: {}", e)))
    }

    pub fn decode_token(&self, token: &str) -> Result<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    ApiError::Unauthorized("Token has expired".to_string())
                }
                _ => ApiError::Unauthorized("Invalid token".to_string()),
            })
    }

    pub fn expiration_seconds(&self) -> i64 {
        self.expiration_seconds
    }
}
