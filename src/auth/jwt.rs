//! JWT Token Service
//!
//! Issues and verifies the signed credential carried in the `token` cookie.

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Credential lifetime. Tokens are cryptographically rejected past this.
pub const TOKEN_TTL_DAYS: i64 = 1;

/// Claims carried by the credential
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject id of the authenticated user
    pub id: i32,
    /// Token issued at timestamp
    pub iat: i64,
    /// Token expiration timestamp
    pub exp: i64,
}

/// Signs and verifies credentials with a key injected at construction.
///
/// The secret is validated once at startup (see `Config::from_env`); there is
/// no per-call environment lookup, so verification is a pure function of
/// (key, token, current time) and never touches the user store.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Create a new token service with the provided secret
    pub fn new(secret: &str) -> Self {
        let encoding_key = EncodingKey::from_secret(secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Issue a signed credential for a subject id, valid for one day
    pub fn issue(&self, subject_id: i32) -> Result<String> {
        let now = Utc::now();
        let expiration = now + Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            id: subject_id,
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to encode auth token")
    }

    /// Verify signature and expiry, returning the decoded claims.
    ///
    /// Pure check only; whether the subject still exists is decided by the
    /// request gate against the user store.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .context("Failed to verify auth token")?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_then_verify_roundtrip() {
        let tokens = TokenService::new("test_secret");

        let token = tokens.issue(42).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.id, 42);
        assert!(claims.exp > claims.iat);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn rejects_token_signed_with_different_key() {
        let issuer = TokenService::new("secret_a");
        let verifier = TokenService::new("secret_b");

        let token = issuer.issue(7).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn rejects_expired_token_with_valid_signature() {
        let tokens = TokenService::new("test_secret");

        let now = Utc::now().timestamp();
        let claims = Claims {
            id: 7,
            iat: now - 2 * 24 * 60 * 60,
            exp: now - 24 * 60 * 60,
        };
        let stale = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test_secret".as_bytes()),
        )
        .unwrap();

        assert!(tokens.verify(&stale).is_err());
    }

    #[test]
    fn rejects_malformed_token() {
        let tokens = TokenService::new("test_secret");
        assert!(tokens.verify("not.a.jwt").is_err());
        assert!(tokens.verify("").is_err());
    }
}
