//! Message REST endpoints

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, rejection::QueryRejection, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use messages_domain::{MessageSnapshot, NewMessage};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::GatewayResult;
use crate::state::GatewayState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub message_id: String,
    pub room_id: String,
    pub sender_id: String,
    pub message: String,
    #[schema(value_type = String, format = DateTime)]
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
}

impl From<MessageSnapshot> for MessageResponse {
    fn from(snapshot: MessageSnapshot) -> Self {
        Self {
            message_id: snapshot.message_id,
            room_id: snapshot.room_id,
            sender_id: snapshot.sender_id,
            message: snapshot.content,
            timestamp: snapshot.timestamp,
            is_read: snapshot.is_read,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    /// Message body, also accepted as `data`
    #[serde(alias = "data")]
    pub message: String,
    pub room_id: String,
    pub sender_id: String,
    /// Defaults to the time the request is handled
    #[schema(value_type = Option<String>, format = DateTime)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_read: bool,
    /// Generated when absent
    pub message_id: Option<String>,
}

impl CreateMessageRequest {
    fn into_new_message(self) -> NewMessage {
        let new_message = NewMessage::new(
            self.message,
            self.room_id,
            self.sender_id,
            self.timestamp.unwrap_or_else(Utc::now),
            self.is_read,
        );

        match self.message_id {
            Some(message_id) => new_message.with_message_id(message_id),
            None => new_message,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListMessagesQuery {
    /// Only return messages of this room
    pub room_id: Option<String>,
}

/// Create message routes
pub fn create_message_routes() -> Router<Arc<GatewayState>> {
    Router::new().route("/messages", get(list_messages).post(create_message))
}

#[utoipa::path(
    get,
    path = "/messages",
    tag = "messages",
    params(ListMessagesQuery),
    responses(
        (status = 200, description = "Stored messages", body = Vec<MessageResponse>),
        (status = 400, description = "Malformed query", body = crate::error::ErrorResponse),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_messages(
    State(state): State<Arc<GatewayState>>,
    query: Result<Query<ListMessagesQuery>, QueryRejection>,
) -> GatewayResult<Json<Vec<MessageResponse>>> {
    let Query(params) = query?;

    let messages = match params.room_id.as_deref() {
        Some(room_id) => state.message_service().list_room_messages(room_id).await?,
        None => state.message_service().list_messages().await?,
    };

    Ok(Json(messages.into_iter().map(MessageResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/messages",
    tag = "messages",
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = MessageResponse),
        (status = 400, description = "Malformed body or invalid message", body = crate::error::ErrorResponse),
        (status = 503, description = "Storage unavailable", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_message(
    State(state): State<Arc<GatewayState>>,
    payload: Result<Json<CreateMessageRequest>, JsonRejection>,
) -> GatewayResult<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload?;

    let snapshot = state
        .message_service()
        .create_message(payload.into_new_message())
        .await?;

    Ok((StatusCode::CREATED, Json(MessageResponse::from(snapshot))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_accepts_data_alias_and_defaults() {
        let request: CreateMessageRequest = serde_json::from_str(
            r#"{"data": "hi", "roomId": "room-1", "senderId": "user-1"}"#,
        )
        .unwrap();

        assert_eq!(request.message, "hi");
        assert!(!request.is_read);
        assert!(request.timestamp.is_none());

        let new_message = request.into_new_message();
        assert_eq!(new_message.content, "hi");
        assert!(new_message.message_id.is_none());
    }

    #[test]
    fn test_create_request_keeps_explicit_fields() {
        let request: CreateMessageRequest = serde_json::from_str(
            r#"{
                "message": "hi",
                "roomId": "room-1",
                "senderId": "user-1",
                "timestamp": "2024-01-01T12:00:00Z",
                "isRead": true,
                "messageId": "m-1"
            }"#,
        )
        .unwrap();

        let new_message = request.into_new_message();
        assert_eq!(new_message.message_id.as_deref(), Some("m-1"));
        assert!(new_message.is_read);
        assert_eq!(new_message.timestamp.to_rfc3339(), "2024-01-01T12:00:00+00:00");
    }
}
