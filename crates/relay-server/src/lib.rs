//! Trading relay HTTP server library
//!
//! Exposes the relay components for the binary and for integration tests.

pub mod api;
pub mod config;
pub mod deriv;
pub mod error;
pub mod upstream;

use crate::config::RelayConfig;
use axum::Router;

/// Build the full application router from configuration
pub fn create_app(config: &RelayConfig) -> anyhow::Result<Router> {
    let state = upstream::init_state(config)?;
    let origins = config.cors_origins()?;
    Ok(api::create_router(state, origins))
}
