//! # Authentication Module
//!
//! Handles credential issuance, verification, and the request gate that
//! secures the project-tracking endpoints. The signing secret is injected at
//! construction and validated once at startup; request handling never reads
//! the environment.

pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
