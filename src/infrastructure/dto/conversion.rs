//! Domain Model ↔ DTO の変換

use crate::domain::{ChatMessage, Timestamp};

use super::websocket::MessageDto;

impl From<&ChatMessage> for MessageDto {
    fn from(message: &ChatMessage) -> Self {
        Self {
            id: message.id.clone(),
            user: message.author.clone(),
            text: message.body.clone(),
            timestamp: message.created_at.value(),
        }
    }
}

impl From<MessageDto> for ChatMessage {
    fn from(dto: MessageDto) -> Self {
        Self {
            id: dto.id,
            author: dto.user,
            body: dto.text,
            created_at: Timestamp::new(dto.timestamp),
        }
    }
}

/// メッセージログ全体を DTO のリストへ変換
pub fn log_to_dto(messages: &[ChatMessage]) -> Vec<MessageDto> {
    messages.iter().map(MessageDto::from).collect()
}
