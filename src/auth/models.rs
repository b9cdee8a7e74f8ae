//! Authentication Models
//!
//! Data structures for authentication requests and the identity injected
//! into gated requests.

use serde::{Deserialize, Serialize};

/// Authenticated user resolved by the request gate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
}

/// Registration request payload
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}
