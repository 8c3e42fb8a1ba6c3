//! Session token module
//!
//! Stateless signed session tokens (HS256 JWTs). The server keeps no
//! session state; each request is verified against the signing secret
//! and the expiry embedded in the token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Claims carried in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id (stringified; the reserved admin id for the configured
    /// admin pair)
    pub sub: String,
    /// Set only on tokens issued to the configured admin pair
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub is_admin: bool,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

impl Claims {
    /// Parse the subject back into a user id
    pub fn user_id(&self) -> Result<i64, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidToken)
    }
}

/// Error types for token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    /// Token is missing, malformed, or has a bad signature
    #[error("Invalid token")]
    InvalidToken,

    /// Token signature is valid but the expiry has passed
    #[error("Token expired")]
    Expired,

    /// Signing failed
    #[error("Failed to sign token: {0}")]
    Signing(String),
}

/// Issues and verifies session tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    /// Create a token service with the given signing secret and lifetime
    pub fn new(secret: &str, ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Issue a token for the given user id
    pub fn issue(&self, user_id: i64, is_admin: bool) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            is_admin,
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify a token and return its claims
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        let validation = Validation::default();

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) => match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::InvalidToken),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    fn service() -> TokenService {
        TokenService::new("test-secret", 7)
    }

    #[test]
    fn test_issue_and_verify() {
        let tokens = service();

        let token = tokens.issue(42, false).expect("Failed to issue token");
        let claims = tokens.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(!claims.is_admin);
    }

    #[test]
    fn test_admin_flag_carried() {
        let tokens = service();

        let token = tokens
            .issue(User::ADMIN_ID, true)
            .expect("Failed to issue token");
        let claims = tokens.verify(&token).expect("Failed to verify token");

        assert_eq!(claims.user_id().unwrap(), User::ADMIN_ID);
        assert!(claims.is_admin);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = service().issue(7, false).expect("Failed to issue token");

        let other = TokenService::new("different-secret", 7);
        let result = other.verify(&token);

        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let result = service().verify("not.a.token");
        assert!(matches!(result, Err(TokenError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        // Negative ttl puts the expiry in the past
        let tokens = TokenService::new("test-secret", -1);
        let token = tokens.issue(7, false).expect("Failed to issue token");

        let result = tokens.verify(&token);
        assert!(matches!(result, Err(TokenError::Expired)));
    }

    #[test]
    fn test_admin_flag_omitted_when_false() {
        let token = service().issue(7, false).expect("Failed to issue token");

        // Decode the payload segment and check the raw JSON shape
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let data = decode::<serde_json::Value>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .expect("Failed to decode");
        assert!(data.claims.get("is_admin").is_none());
    }
}
