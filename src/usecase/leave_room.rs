//! UseCase: ルーム退出処理
//!
//! 明示的な leave イベントと切断（drop）は構造的に同一の遷移であり、
//! この UseCase を共有します。切断経路では追加で送信チャンネルの解放
//! （`release_connection`）が行われます。
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退出処理（退出前グループへのログ配信対象取得、冪等な削除、
//!   削除が発生した場合のみのカウント更新）
//!
//! ### なぜこのテストが必要か
//! - leave と drop が競合してもカウントが二重に減らないことを保証
//! - 非メンバーの退出でカウント更新が発生しないことを確認
//! - ログ配信は在室状況と無関係に一度行われることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーの退出と残存メンバーへの通知
//! - エッジケース：最後のメンバーの退出、退出済み接続の再退出

use std::sync::Arc;

use crate::domain::{
    BroadcastGroup, ChatMessage, ConnectionId, MessagePushError, MessagePusher, RoomRepository,
};

/// カウント更新の内容と宛先
///
/// 削除が実際に発生した場合にのみ生成されます。宛先は削除反映後の
/// メンバーシップです。
#[derive(Debug, Clone, PartialEq)]
pub struct CountUpdate {
    pub targets: BroadcastGroup,
    pub member_count: usize,
}

/// 退出遷移の結果
#[derive(Debug, Clone, PartialEq)]
pub struct LeaveOutcome {
    /// ログ配信の宛先（削除前のメンバーシップ）
    pub log_targets: BroadcastGroup,
    /// 配信するログスナップショット
    pub messages: Vec<ChatMessage>,
    /// 削除が発生した場合のみのカウント更新（冪等性の要）
    pub count_update: Option<CountUpdate>,
}

/// ルーム退出のユースケース
///
/// 遷移: `Joined → Disconnected`（未参加なら no-op）。
/// ログを一度配信した後でメンバーシップからの削除を試み、削除が実際に
/// 発生した場合に限り更新後のカウントを配信対象とします。これにより
/// leave と drop が同一接続に対して連続しても、カウントが二重に
/// 減ることはありません。
pub struct LeaveRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// 退出遷移を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 退出する接続の ID
    ///
    /// # Returns
    ///
    /// ログ配信の宛先・内容と、削除が発生した場合のカウント更新
    pub async fn execute(&self, connection_id: &ConnectionId) -> LeaveOutcome {
        // 1. 削除前のグループとログスナップショットを取得
        //    （ログ配信は在室状況と無関係に一度行われる）
        let log_targets = self.repository.broadcast_group().await;
        let messages = self.repository.message_snapshot().await;

        // 2. メンバーシップと登録簿から冪等に削除
        let removed = self.repository.leave_room(connection_id).await;
        self.repository.unregister_participant(connection_id).await;

        // 3. 削除が実際に発生した場合のみカウント更新を生成
        let count_update = if removed {
            let targets = self.repository.broadcast_group().await;
            let member_count = targets.len();
            Some(CountUpdate {
                targets,
                member_count,
            })
        } else {
            None
        };

        LeaveOutcome {
            log_targets,
            messages,
            count_update,
        }
    }

    /// 切断経路で送信チャンネルを解放
    pub async fn release_connection(&self, connection_id: &ConnectionId) {
        self.message_pusher.unregister_client(connection_id).await;
    }

    /// 取得済みのグループへ直列化済みメッセージをブロードキャスト
    pub async fn broadcast_update(
        &self,
        targets: &BroadcastGroup,
        message: &str,
    ) -> Result<(), MessagePushError> {
        self.message_pusher.broadcast(targets, message).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{Room, Timestamp},
        infrastructure::{
            message_pusher::WebSocketMessagePusher, repository::InMemoryRoomRepository,
        },
    };
    use std::collections::HashMap;
    use tokio::sync::Mutex;

    fn create_test_repository() -> Arc<InMemoryRoomRepository> {
        let room = Arc::new(Mutex::new(Room::new(Timestamp::new(0))));
        Arc::new(InMemoryRoomRepository::new(room))
    }

    fn create_test_message_pusher() -> Arc<WebSocketMessagePusher> {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        Arc::new(WebSocketMessagePusher::new(clients))
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string())
    }

    #[tokio::test]
    async fn test_leave_removes_member_and_updates_count() {
        // テスト項目: メンバーの退出で削除が発生し、残存メンバー宛の
        //             カウント更新が生成される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveRoomUseCase::new(repository.clone(), create_test_message_pusher());
        repository.join_room(conn("conn-a")).await;
        repository.join_room(conn("conn-b")).await;

        // when (操作):
        let outcome = usecase.execute(&conn("conn-a")).await;

        // then (期待する結果): ログ宛先は削除前の 2 接続、カウント宛先は残りの 1 接続
        assert_eq!(outcome.log_targets.len(), 2);
        let count_update = outcome.count_update.expect("count update expected");
        assert_eq!(count_update.member_count, 1);
        assert_eq!(count_update.targets.len(), 1);
        assert!(count_update.targets.contains(&conn("conn-b")));
    }

    #[tokio::test]
    async fn test_leave_of_non_member_produces_no_count_update() {
        // テスト項目: 非メンバーの退出ではカウント更新が生成されない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveRoomUseCase::new(repository.clone(), create_test_message_pusher());
        repository.join_room(conn("conn-a")).await;

        // when (操作):
        let outcome = usecase.execute(&conn("conn-b")).await;

        // then (期待する結果): ログ配信は行われるがカウント更新はなし
        assert_eq!(outcome.log_targets.len(), 1);
        assert!(outcome.count_update.is_none());
        assert_eq!(repository.member_count().await, 1);
    }

    #[tokio::test]
    async fn test_leave_then_drop_does_not_double_decrement() {
        // テスト項目: leave の直後に drop が続いても二度目のカウント更新はない
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveRoomUseCase::new(repository.clone(), create_test_message_pusher());
        repository.join_room(conn("conn-a")).await;
        repository.join_room(conn("conn-b")).await;

        // when (操作): 明示的な leave のあと、同じ接続の切断処理が走る
        let first = usecase.execute(&conn("conn-a")).await;
        let second = usecase.execute(&conn("conn-a")).await;

        // then (期待する結果):
        assert!(first.count_update.is_some());
        assert!(second.count_update.is_none());
        assert_eq!(repository.member_count().await, 1);
    }

    #[tokio::test]
    async fn test_last_member_leaving_updates_nobody() {
        // テスト項目: 最後のメンバーの退出ではカウント更新の宛先が空
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveRoomUseCase::new(repository.clone(), create_test_message_pusher());
        repository.join_room(conn("conn-a")).await;

        // when (操作):
        let outcome = usecase.execute(&conn("conn-a")).await;

        // then (期待する結果):
        let count_update = outcome.count_update.expect("count update expected");
        assert_eq!(count_update.member_count, 0);
        assert!(count_update.targets.is_empty());
    }

    #[tokio::test]
    async fn test_leave_unregisters_participant() {
        // テスト項目: 退出で参加者の登録も解除される
        // given (前提条件):
        let repository = create_test_repository();
        let usecase = LeaveRoomUseCase::new(repository.clone(), create_test_message_pusher());
        repository
            .register_participant(crate::domain::Participant::new(
                conn("conn-a"),
                "Alice".to_string(),
            ))
            .await;
        repository.join_room(conn("conn-a")).await;

        // when (操作):
        usecase.execute(&conn("conn-a")).await;

        // then (期待する結果):
        assert_eq!(repository.participant_count().await, 0);
        assert_eq!(repository.member_count().await, 0);
    }
}
