//! Auth routes for registration, login, and logout

use argon2::password_hash::rand_core::OsRng;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::{
    Json, Router,
    extract::State,
    routing::post,
};
use axum_extra::extract::cookie::{Cookie, SameSite};
use serde_json::json;

use crate::auth::jwt::TOKEN_TTL_DAYS;
use crate::auth::middleware::TOKEN_COOKIE;
use crate::auth::models::{AuthUser, LoginRequest, RegisterRequest};
use crate::server::AppState;

/// Credential cookie sent after register/login. HttpOnly so the client
/// script never reads the token; SameSite=None because the browser client
/// is served from a different origin.
fn token_cookie(token: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, token);
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::None);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::days(TOKEN_TTL_DAYS));
    cookie
}

/// Expired replacement cookie used by logout
fn clear_token_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::new(TOKEN_COOKIE, "");
    cookie.set_http_only(true);
    cookie.set_secure(true);
    cookie.set_same_site(SameSite::None);
    cookie.set_path("/");
    cookie.set_max_age(time::Duration::ZERO);
    cookie
}

fn hash_password(password: &str) -> Result<String, StatusCode> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

fn verify_password(password: &str, hash: &str) -> bool {
    PasswordHash::new(hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}

fn fail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "success": false, "message": message }))).into_response()
}

/// Issue the credential cookie alongside a JSON body
fn with_cookie(status: StatusCode, cookie: Cookie<'_>, body: serde_json::Value) -> Response {
    (
        status,
        [(header::SET_COOKIE, cookie.to_string())],
        Json(body),
    )
        .into_response()
}

pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Response {
    let email = payload.email.trim().to_lowercase();
    let password = payload.password;

    if email.is_empty() || password.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "All fields are required");
    }

    match state.db.find_user_by_email(&email).await {
        Ok(Some(_)) => return fail(StatusCode::CONFLICT, "Email already registered"),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to query user by email: {e:#}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    }

    let password_hash = match hash_password(&password) {
        Ok(h) => h,
        Err(status) => return fail(status, "Internal server error"),
    };

    let user = match state.db.insert_user(&email, &password_hash).await {
        Ok(user) => user,
        Err(e) => {
            tracing::error!("Failed to insert user: {e:#}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    let token = match state.tokens.issue(user.id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue token: {e:#}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };
    tracing::debug!(subject = user.id, "credential issued on register");

    let auth_user = AuthUser {
        id: user.id,
        email: user.email,
    };
    with_cookie(
        StatusCode::CREATED,
        token_cookie(token),
        json!({ "success": true, "user": auth_user }),
    )
}

pub async fn login(State(state): State<AppState>, Json(payload): Json<LoginRequest>) -> Response {
    let email = payload.email.trim().to_lowercase();
    let password = payload.password;

    if email.is_empty() || password.is_empty() {
        return fail(StatusCode::BAD_REQUEST, "All fields are required");
    }

    let user = match state.db.find_user_by_email(&email).await {
        Ok(Some(user)) => user,
        Ok(None) => return fail(StatusCode::UNAUTHORIZED, "Invalid email or password"),
        Err(e) => {
            tracing::error!("Failed to query user by email: {e:#}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };

    if !verify_password(&password, &user.password_hash) {
        return fail(StatusCode::UNAUTHORIZED, "Invalid email or password");
    }

    let token = match state.tokens.issue(user.id) {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to issue token: {e:#}");
            return fail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
        }
    };
    tracing::debug!(subject = user.id, "credential issued on login");

    let auth_user = AuthUser {
        id: user.id,
        email: user.email,
    };
    with_cookie(
        StatusCode::OK,
        token_cookie(token),
        json!({ "success": true, "user": auth_user }),
    )
}

pub async fn logout() -> Response {
    // Stateless credentials: logging out just expires the cookie.
    with_cookie(
        StatusCode::OK,
        clear_token_cookie(),
        json!({ "success": true, "message": "Logged out" }),
    )
}

pub fn create_auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_hash_roundtrip() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash));
        assert!(!verify_password("hunter3", &hash));
    }

    #[test]
    fn verify_rejects_garbage_hash() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn token_cookie_attributes() {
        let cookie = token_cookie("abc".to_string());
        assert_eq!(cookie.name(), TOKEN_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age(), Some(time::Duration::days(1)));
    }

    #[test]
    fn logout_cookie_expires_immediately() {
        let cookie = clear_token_cookie();
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
    }
}
