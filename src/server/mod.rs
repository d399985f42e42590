//! Server module for building the dashboard's HTTP server
//!
//! `ServerBuilder` wires a data backend and the configuration into:
//! - Health check routes
//! - Invoice list, creation form and edit page routes

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
