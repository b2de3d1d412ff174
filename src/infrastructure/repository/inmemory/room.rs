//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! `Room` 集約を単一の `tokio::sync::Mutex` で保護し、登録簿・
//! メンバーシップ・ログへの各操作をこの境界で直列化します。
//! 「追記してスナップショットを取る」「削除してカウントを取る」の各組は
//! 同じロックに対する順次操作として観測されます。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastGroup, ChatMessage, ConnectionId, Participant, Room, RoomRepository,
};

/// インメモリ Room Repository 実装
///
/// Room ドメインモデルを保持し、ドメイン層の RoomRepository trait を
/// 実装します（依存性の逆転）。
pub struct InMemoryRoomRepository {
    /// Room ドメインモデル
    room: Arc<Mutex<Room>>,
}

impl InMemoryRoomRepository {
    /// 新しい InMemoryRoomRepository を作成
    pub fn new(room: Arc<Mutex<Room>>) -> Self {
        Self { room }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn register_participant(&self, participant: Participant) {
        let mut room = self.room.lock().await;
        room.register_participant(participant);
    }

    async fn unregister_participant(&self, connection_id: &ConnectionId) -> bool {
        let mut room = self.room.lock().await;
        room.unregister_participant(connection_id)
    }

    async fn participant_count(&self) -> usize {
        let room = self.room.lock().await;
        room.participant_count()
    }

    async fn participants(&self) -> Vec<Participant> {
        let room = self.room.lock().await;
        room.participants()
    }

    async fn join_room(&self, connection_id: ConnectionId) {
        let mut room = self.room.lock().await;
        room.join(connection_id);
    }

    async fn leave_room(&self, connection_id: &ConnectionId) -> bool {
        let mut room = self.room.lock().await;
        room.leave(connection_id)
    }

    async fn member_count(&self) -> usize {
        let room = self.room.lock().await;
        room.member_count()
    }

    async fn broadcast_group(&self) -> BroadcastGroup {
        let room = self.room.lock().await;
        room.broadcast_group()
    }

    async fn append_message(&self, message: ChatMessage) {
        let mut room = self.room.lock().await;
        room.append_message(message);
    }

    async fn message_snapshot(&self) -> Vec<ChatMessage> {
        let room = self.room.lock().await;
        room.message_snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Timestamp;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomRepository の基本操作（参加・退出・追記・取得）
    // - 登録簿とメンバーシップの独立性（登録のみではメンバーにならない）
    // - 冪等な削除（存在しない接続の退出・解除）
    //
    // 【なぜこのテストが必要か】
    // - Repository は UseCase から呼ばれるデータアクセス層の中核
    // - 単一ロック境界で Room 集約の一貫性を保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. 参加者登録・ルーム参加の成功ケース
    // 2. 退出の冪等性
    // 3. メッセージ追記とスナップショット
    // 4. ブロードキャストグループの取得
    // ========================================

    fn create_test_repository() -> InMemoryRoomRepository {
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(0))));
        InMemoryRoomRepository::new(room)
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string())
    }

    #[tokio::test]
    async fn test_register_participant_does_not_join_room() {
        // テスト項目: 参加者登録のみではメンバーシップは変化しない
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        repo.register_participant(Participant::new(conn("conn-a"), "Alice".to_string()))
            .await;

        // then (期待する結果):
        assert_eq!(repo.participant_count().await, 1);
        assert_eq!(repo.member_count().await, 0);
    }

    #[tokio::test]
    async fn test_join_and_leave_room() {
        // テスト項目: join でメンバーになり、leave で削除が報告される
        // given (前提条件):
        let repo = create_test_repository();
        repo.join_room(conn("conn-a")).await;

        // when (操作):
        let removed = repo.leave_room(&conn("conn-a")).await;

        // then (期待する結果):
        assert!(removed);
        assert_eq!(repo.member_count().await, 0);
    }

    #[tokio::test]
    async fn test_leave_room_is_idempotent() {
        // テスト項目: 存在しない接続の退出は false を返し、何も起きない
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        let removed = repo.leave_room(&conn("conn-a")).await;

        // then (期待する結果):
        assert!(!removed);
        assert_eq!(repo.member_count().await, 0);
    }

    #[tokio::test]
    async fn test_append_message_and_snapshot() {
        // テスト項目: 追記したメッセージがブートストラップに続いて順に取得できる
        // given (前提条件):
        let repo = create_test_repository();

        // when (操作):
        repo.append_message(ChatMessage::new(
            "m1".to_string(),
            "Alice".to_string(),
            "hi".to_string(),
            Timestamp::new(10),
        ))
        .await;
        let snapshot = repo.message_snapshot().await;

        // then (期待する結果):
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[1].id, "m1");
        assert_eq!(snapshot[1].body, "hi");
    }

    #[tokio::test]
    async fn test_broadcast_group_contains_all_members() {
        // テスト項目: ブロードキャストグループに現在の全メンバーが含まれる
        // given (前提条件):
        let repo = create_test_repository();
        repo.join_room(conn("conn-a")).await;
        repo.join_room(conn("conn-b")).await;

        // when (操作):
        let group = repo.broadcast_group().await;

        // then (期待する結果):
        assert_eq!(group.len(), 2);
        assert!(group.contains(&conn("conn-a")));
        assert!(group.contains(&conn("conn-b")));
    }
}
