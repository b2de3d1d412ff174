//! HTTP API response DTOs.

use serde::Serialize;

use super::websocket::MessageDto;

/// Participant entry in the debug room view.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantDto {
    pub connection_id: String,
    pub display_name: String,
}

/// Snapshot of the room state returned by `GET /debug/room`.
#[derive(Debug, Clone, Serialize)]
pub struct RoomStateDto {
    pub online_count: usize,
    pub participants: Vec<ParticipantDto>,
    pub messages: Vec<MessageDto>,
}
