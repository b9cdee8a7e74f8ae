// # Routes Module
//
// - This module contains all HTTP route handlers for the Protrack Server.
// - Routes are organized by functionality into separate submodules.
//
// ## Adding New Routes
// - 1. Create a new file in the `routes/` directory
// - 2. Add the module declaration here with `pub mod module_name;`
// - 3. Register the routes in `server.rs` using the Router

/// Health check and monitoring endpoints
pub mod health;

/// Registration, login, and logout endpoints
pub mod auth;

/// Project create/list/status endpoints
pub mod projects;

/// Dashboard counter and chart endpoints
pub mod dashboard;
