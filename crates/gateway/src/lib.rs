//! # Messages Gateway Crate
//!
//! HTTP layer of the messages service. Parses requests, hands them to the
//! [`MessageService`](messages_domain::MessageService) and maps domain
//! errors onto status codes.
//!
//! ## Usage
//!
//! ```rust
//! use messages_gateway::{create_router, GatewayState};
//!
//! let app = create_router(GatewayState::in_memory());
//! # let _ = app;
//! ```

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ErrorResponse, GatewayError, GatewayResult};
pub use state::GatewayState;

use std::sync::Arc;

use axum::{middleware as axum_middleware, Router};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// OpenAPI description of every route
#[cfg(debug_assertions)]
#[derive(OpenApi)]
#[openapi(
    paths(
        rest::greeting::greeting,
        rest::health::health_check,
        rest::message::list_messages,
        rest::message::create_message,
    ),
    components(
        schemas(
            rest::greeting::GreetingResponse,
            rest::health::HealthResponse,
            rest::message::MessageResponse,
            rest::message::CreateMessageRequest,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Liveness endpoints"),
        (name = "messages", description = "Message storage"),
    )
)]
pub struct ApiDoc;

/// Create the main application router with all routes
pub fn create_router(state: GatewayState) -> Router {
    let arc_state = Arc::new(state);

    #[allow(unused_mut)]
    let mut router = Router::new().merge(rest::create_rest_routes().with_state(arc_state));

    // Add Swagger UI if in debug mode
    #[cfg(debug_assertions)]
    {
        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    router
        .layer(middleware::create_cors_middleware())
        .layer(axum_middleware::from_fn(middleware::logging_middleware))
        .layer(middleware::create_trace_middleware())
}
