//! Greeting endpoint kept from the first deployed version of the service.

use axum::Json;
use serde::Serialize;
use utoipa::ToSchema;

pub const GREETING: &str = "Hello World v3";

#[derive(Debug, Serialize, ToSchema)]
pub struct GreetingResponse {
    pub message: String,
}

#[utoipa::path(
    get,
    path = "/",
    tag = "health",
    responses(
        (status = 200, description = "Static greeting", body = GreetingResponse)
    )
)]
pub async fn greeting() -> Json<GreetingResponse> {
    Json(GreetingResponse {
        message: GREETING.to_string(),
    })
}
