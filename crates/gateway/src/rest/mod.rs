//! REST API endpoints for the gateway

pub mod greeting;
pub mod health;
pub mod message;

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::state::GatewayState;

/// Create all REST API routes
pub fn create_rest_routes() -> Router<Arc<GatewayState>> {
    Router::new()
        .route("/", get(greeting::greeting))
        .route("/health", get(health::health_check))
        .merge(message::create_message_routes())
}
