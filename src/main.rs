//! # Protrack Server
//!
//! Project-tracking HTTP API server built with Rust, Axum, and Tokio.
//! Serves the browser client's form UI: user registration and login with a
//! cookie-carried credential, project creation and listing, status updates,
//! and the dashboard/chart aggregates.
//!
//! ## Architecture
//! The server is organized into modules:
//! - `server`: Core server initialization and route wiring
//! - `config`: Environment variable configuration, validated at startup
//! - `auth`: Credential issuance, verification, and the request gate
//! - `database`: PostgreSQL pool, models, and embedded migrations
//! - `routes`: HTTP route handlers organized by functionality
//!
//! ## Environment Setup
//! Copy `.env.example` to `.env` and configure:
//! ```bash
//! cp .env.example .env
//! # Set SECRET_KEY and DATABASE_URL
//! ```
//!
//! ## Running the Server
//! ```bash
//! cargo run
//! ```
//!
//! The server will start on `http://0.0.0.0:3030` by default.

mod auth;
mod config;
mod database;
mod routes;
mod server;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Application entry point.
///
/// Loads `.env`, initializes the tracing subscriber, validates configuration
/// (a missing `SECRET_KEY` or `DATABASE_URL` aborts here, before any request
/// is accepted), and runs the HTTP server until terminated.
#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false) // Don't show module targets for cleaner output
                .compact(),
        )
        .init();

    tracing::info!("🏁 Starting Protrack Server...");
    tracing::info!(
        "📦 Package: {} v{}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    let config = match config::Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = server::start(config).await {
        tracing::error!("Server failed: {e:#}");
        std::process::exit(1);
    }
}
