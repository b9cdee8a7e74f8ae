//! # Database Module
//!
//! PostgreSQL integration over tokio-postgres with deadpool pooling.
//! Includes connection management, models, and embedded migrations.

pub mod connection;
pub mod migrations;
pub mod models;

pub use connection::{DatabaseConfig, DatabaseConnection};
pub use models::*;
