//! UseCase: ルーム状態取得処理
//!
//! HTTP のデバッグ用エンドポイント向けに、現在の参加者・オンライン数・
//! メッセージログの読み取り専用ビューを提供します。

use std::sync::Arc;

use crate::domain::{ChatMessage, Participant, RoomRepository};

/// Read-only view of the room for inspection.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomState {
    pub online_count: usize,
    pub participants: Vec<Participant>,
    pub messages: Vec<ChatMessage>,
}

/// ルーム状態取得のユースケース
pub struct GetRoomStateUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomStateUseCase {
    /// 新しい GetRoomStateUseCase を作成
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// 現在のルーム状態を取得
    pub async fn execute(&self) -> RoomState {
        let online_count = self.repository.member_count().await;
        let participants = self.repository.participants().await;
        let messages = self.repository.message_snapshot().await;

        RoomState {
            online_count,
            participants,
            messages,
        }
    }
}
