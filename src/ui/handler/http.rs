//! HTTP API endpoint handlers.

use std::sync::Arc;

use axum::{Json, extract::State};

use crate::{
    infrastructure::dto::{
        conversion::log_to_dto,
        http::{ParticipantDto, RoomStateDto},
    },
    ui::state::AppState,
};

/// Health check endpoint
pub async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

/// Debug endpoint to get current room state (for testing purposes)
pub async fn debug_room_state(State(state): State<Arc<AppState>>) -> Json<RoomStateDto> {
    let room_state = state.get_room_state_usecase.execute().await;

    // Domain Model から DTO への変換
    let participants: Vec<ParticipantDto> = room_state
        .participants
        .iter()
        .map(|p| ParticipantDto {
            connection_id: p.connection_id.as_str().to_string(),
            display_name: p.display_name.clone(),
        })
        .collect();

    Json(RoomStateDto {
        online_count: room_state.online_count,
        participants,
        messages: log_to_dto(&room_state.messages),
    })
}
