//! Error taxonomy for the authentication gate.
//!
//! Each variant maps to the HTTP status and message the client sees; none of
//! them are retried, every rejection ends the request.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    /// No credential cookie on the request at all
    #[error("Unauthorized")]
    Unauthenticated,

    /// Cookie present but carries no token value
    #[error("Unauthorized: token expired")]
    TokenMissing,

    /// Bad signature, malformed token, or expired
    #[error("Unauthorized")]
    InvalidOrExpiredToken,

    /// Token verified but the subject id no longer resolves to a user
    #[error("User not found")]
    UserNotFound,

    /// User store was unreachable while resolving the subject
    #[error("Internal server error")]
    Store(#[from] anyhow::Error),
}

impl AuthError {
    pub fn status(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated
            | AuthError::TokenMissing
            | AuthError::InvalidOrExpiredToken => StatusCode::UNAUTHORIZED,
            AuthError::UserNotFound => StatusCode::NOT_FOUND,
            AuthError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "message": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_statuses_match_contract() {
        assert_eq!(AuthError::Unauthenticated.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::TokenMissing.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AuthError::InvalidOrExpiredToken.status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AuthError::UserNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            AuthError::Store(anyhow::anyhow!("pool exhausted")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn missing_cookie_and_empty_token_are_distinct_rejections() {
        // Both are 401-class but carry different messages, mirroring the
        // separate gate states for "no cookie" and "cookie with no value".
        assert_ne!(
            AuthError::Unauthenticated.to_string(),
            AuthError::TokenMissing.to_string()
        );
    }
}
