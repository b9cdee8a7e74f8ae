//! Authentication Middleware
//!
//! Axum middleware guarding the project and dashboard routes. A request is
//! forwarded only when the `token` cookie verifies against the signing key
//! and its subject id still resolves to a user record, so deleting a user
//! revokes every outstanding credential.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::auth::{error::AuthError, models::AuthUser};
use crate::server::AppState;

/// Cookie carrying the signed credential
pub const TOKEN_COOKIE: &str = "token";

pub struct AuthMiddleware;

impl AuthMiddleware {
    /// Validate the credential cookie and inject the resolved user.
    ///
    /// Rejections terminate the request immediately: 401 for a missing or
    /// unverifiable credential, 404 when the subject no longer exists, 500
    /// when the user store is unreachable.
    pub async fn validate_token(
        State(state): State<AppState>,
        jar: CookieJar,
        mut req: Request,
        next: Next,
    ) -> Result<Response, AuthError> {
        let token = token_from_jar(&jar)?;

        let claims = state.tokens.verify(token).map_err(|e| {
            tracing::debug!("token verification failed: {e:#}");
            AuthError::InvalidOrExpiredToken
        })?;
        tracing::debug!(subject = claims.id, "token verified");

        let user = state
            .db
            .find_user_by_id(claims.id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        req.extensions_mut().insert(AuthUser {
            id: user.id,
            email: user.email,
        });

        Ok(next.run(req).await)
    }
}

/// Pull the token value out of the cookie jar.
///
/// A missing cookie and a cookie with an empty value are distinct states:
/// the first means the client never authenticated, the second that the
/// browser expired the cookie but kept its name around.
fn token_from_jar(jar: &CookieJar) -> Result<&str, AuthError> {
    let cookie = jar.get(TOKEN_COOKIE).ok_or(AuthError::Unauthenticated)?;
    let value = cookie.value();
    if value.is_empty() {
        return Err(AuthError::TokenMissing);
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum_extra::extract::cookie::Cookie;

    #[test]
    fn missing_cookie_is_unauthenticated() {
        let jar = CookieJar::new();
        assert!(matches!(
            token_from_jar(&jar),
            Err(AuthError::Unauthenticated)
        ));
    }

    #[test]
    fn empty_cookie_value_is_token_missing() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, ""));
        assert!(matches!(token_from_jar(&jar), Err(AuthError::TokenMissing)));
    }

    #[test]
    fn present_cookie_value_is_returned() {
        let jar = CookieJar::new().add(Cookie::new(TOKEN_COOKIE, "abc.def.ghi"));
        assert_eq!(token_from_jar(&jar).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn unrelated_cookies_do_not_authenticate() {
        let jar = CookieJar::new().add(Cookie::new("session_hint", "1"));
        assert!(matches!(
            token_from_jar(&jar),
            Err(AuthError::Unauthenticated)
        ));
    }
}
