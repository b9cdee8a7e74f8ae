//! # Server Module
//!
//! HTTP server setup and route configuration for the Protrack server.

use anyhow::{Context, Result};
use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;

use crate::auth::jwt::TokenService;
use crate::auth::middleware::AuthMiddleware;
use crate::config::Config;
use crate::database::connection::DatabaseConnection;
use crate::routes::{auth, dashboard, health, projects};

/// Application state shared across all route handlers
#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<TokenService>,
    pub db: Arc<DatabaseConnection>,
}

/// Starts the Protrack HTTP server.
///
/// Builds the token service from the injected secret, connects the database
/// pool, applies migrations, and serves the router until the process is
/// terminated.
pub async fn start(config: Config) -> Result<()> {
    let tokens = Arc::new(TokenService::new(&config.secret_key));

    let db = Arc::new(
        DatabaseConnection::from_url(&config.database.url, config.database.max_connections)
            .await
            .context("Failed to connect to database")?,
    );
    db.migrate().await?;

    let app_state = AppState { tokens, db };

    // Project and dashboard endpoints require authentication
    let gated_routes = Router::new()
        .route("/create-project", post(projects::create_project))
        .route("/project-list", get(projects::project_list))
        .route("/update-status", put(projects::update_status))
        .route("/dashboard", get(dashboard::dashboard))
        .route("/chart", get(dashboard::chart))
        .layer(middleware::from_fn_with_state(
            app_state.clone(),
            AuthMiddleware::validate_token,
        ));

    let cors_origin = config
        .cors_origin
        .parse::<axum::http::HeaderValue>()
        .context("CLIENT_ORIGIN is not a valid origin")?;

    // Main app router
    let app = Router::new()
        .route("/ping", get(health::ping)) // Health check endpoint
        .merge(auth::create_auth_routes())
        .merge(gated_routes)
        .layer(
            ServiceBuilder::new().layer(
                CorsLayer::new()
                    .allow_origin([cors_origin])
                    .allow_methods([
                        axum::http::Method::GET,
                        axum::http::Method::POST,
                        axum::http::Method::PUT,
                        axum::http::Method::OPTIONS,
                    ])
                    .allow_headers([
                        axum::http::header::ORIGIN,
                        axum::http::header::CONTENT_TYPE,
                        axum::http::header::ACCEPT,
                    ])
                    .allow_credentials(true), // Credential cookie rides on every request
            ),
        )
        .with_state(app_state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr} - port may already be in use"))?;

    tracing::info!("🚀 Protrack Server starting...");
    tracing::info!("📡 Listening on http://{}", addr);
    tracing::info!("🏥 Health check available at http://{}/ping", addr);
    tracing::info!("🔐 Auth endpoints available at http://{}/auth/*", addr);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
