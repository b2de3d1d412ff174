//! WebSocket event DTOs.
//!
//! Inbound events arrive as adjacently tagged JSON:
//!
//! ```json
//! {"event": "join-room", "data": {"name": "Alice"}}
//! {"event": "send-message", "data": {"id": "x1", "user": "Alice", "text": "hi", "timestamp": 1700000000000}}
//! {"event": "leave"}
//! ```
//!
//! A payload with a missing required field fails deserialization and is
//! dropped at the boundary before it reaches the event dispatch.
//! Outbound events use the same envelope with `update-user-count` and
//! `update-data`.

use serde::{Deserialize, Serialize};

/// Chat message on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageDto {
    pub id: String,
    pub user: String,
    pub text: String,
    pub timestamp: i64,
}

/// Payload of a `join-room` event.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JoinRoomPayload {
    pub name: String,
}

/// Inbound lifecycle events, one tagged variant per event kind.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum InboundEvent {
    JoinRoom(JoinRoomPayload),
    SendMessage(MessageDto),
    Leave,
}

/// Outbound event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    UpdateUserCount,
    UpdateData,
}

/// `update-user-count` envelope: the current online count.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateUserCountMessage {
    pub event: EventType,
    pub data: usize,
}

impl UpdateUserCountMessage {
    pub fn new(count: usize) -> Self {
        Self {
            event: EventType::UpdateUserCount,
            data: count,
        }
    }
}

/// `update-data` envelope: the full message log in append order.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateDataMessage {
    pub event: EventType,
    pub data: Vec<MessageDto>,
}

impl UpdateDataMessage {
    pub fn new(messages: Vec<MessageDto>) -> Self {
        Self {
            event: EventType::UpdateData,
            data: messages,
        }
    }
}
