//! User-profile service backend: bearer-token validation and the HTTP surface around it.
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
