//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - WebSocket の `UnboundedSender` を管理
//! - ブロードキャストグループへのメッセージ配送
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`src/ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に
//! 使用します。配送は接続ごとのベストエフォートで、閉じた／存在しない
//! 宛先はログに残してスキップし、残りの宛先への配送を続行します。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    BroadcastGroup, ConnectionId, MessagePushError, MessagePusher, PusherChannel,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## フィールド
///
/// - `clients`: 接続中のクライアントと対応する WebSocket sender のマップ
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの WebSocket sender
    ///
    /// Key: connection_id (String)
    /// Value: PusherChannel
    clients: Arc<Mutex<HashMap<String, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    /// 新しい WebSocketMessagePusher を作成
    pub fn new(clients: Arc<Mutex<HashMap<String, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection_id.as_str().to_string(), sender);
        tracing::debug!("Connection '{}' registered to MessagePusher", connection_id);
    }

    async fn unregister_client(&self, connection_id: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection_id.as_str());
        tracing::debug!(
            "Connection '{}' unregistered from MessagePusher",
            connection_id
        );
    }

    async fn broadcast(
        &self,
        targets: &BroadcastGroup,
        content: &str,
    ) -> Result<(), MessagePushError> {
        let clients = self.clients.lock().await;

        for target in targets {
            if let Some(sender) = clients.get(target.as_str()) {
                // ブロードキャストでは一部の送信失敗を許容
                if let Err(e) = sender.send(content.to_string()) {
                    tracing::warn!(
                        "Failed to push message to connection '{}': {}",
                        target.as_str(),
                        e
                    );
                } else {
                    tracing::debug!("Broadcasted message to connection '{}'", target.as_str());
                }
            } else {
                tracing::warn!(
                    "Connection '{}' not found during broadcast, skipping",
                    target.as_str()
                );
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - WebSocketMessagePusher のブロードキャスト機能
    // - エラーハンドリング（存在しない宛先、閉じたチャンネル）
    //
    // 【なぜこのテストが必要か】
    // - 一部の宛先への配送失敗が他の宛先への配送を妨げないこと
    //   （fire-and-forget セマンティクス）を保証する必要がある
    //
    // 【どのようなシナリオをテストするか】
    // 1. broadcast の成功ケース（複数宛先）
    // 2. broadcast の部分失敗ケース（未登録の宛先を含む）
    // 3. broadcast の部分失敗ケース（受信側が閉じた宛先を含む）
    // 4. 空のグループへの broadcast
    // ========================================

    fn create_test_pusher() -> (
        WebSocketMessagePusher,
        Arc<Mutex<HashMap<String, PusherChannel>>>,
    ) {
        let clients = Arc::new(Mutex::new(HashMap::new()));
        let pusher = WebSocketMessagePusher::new(clients.clone());
        (pusher, clients)
    }

    fn conn(id: &str) -> ConnectionId {
        ConnectionId::new(id.to_string())
    }

    #[tokio::test]
    async fn test_broadcast_success() {
        // テスト項目: グループの全宛先にメッセージが配送される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(conn("conn-a"), tx1).await;
        pusher.register_client(conn("conn-b"), tx2).await;

        // when (操作):
        let targets = BroadcastGroup::new(vec![conn("conn-a"), conn("conn-b")]);
        let result = pusher.broadcast(&targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_unknown_connection() {
        // テスト項目: 未登録の宛先が含まれていても残りの宛先へ配送される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, mut rx1) = mpsc::unbounded_channel();
        pusher.register_client(conn("conn-a"), tx1).await;

        // when (操作):
        let targets = BroadcastGroup::new(vec![conn("nonexistent"), conn("conn-a")]);
        let result = pusher.broadcast(&targets, "Broadcast message").await;

        // then (期待する結果): ブロードキャストは部分失敗を許容
        assert!(result.is_ok());
        assert_eq!(rx1.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_skips_closed_channel() {
        // テスト項目: 受信側が閉じた宛先が含まれていても残りの宛先へ配送される
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();
        let (tx1, rx1) = mpsc::unbounded_channel();
        let (tx2, mut rx2) = mpsc::unbounded_channel();
        pusher.register_client(conn("conn-a"), tx1).await;
        pusher.register_client(conn("conn-b"), tx2).await;
        drop(rx1); // conn-a は既に切断済み

        // when (操作):
        let targets = BroadcastGroup::new(vec![conn("conn-a"), conn("conn-b")]);
        let result = pusher.broadcast(&targets, "Broadcast message").await;

        // then (期待する結果):
        assert!(result.is_ok());
        assert_eq!(rx2.recv().await, Some("Broadcast message".to_string()));
    }

    #[tokio::test]
    async fn test_broadcast_empty_targets() {
        // テスト項目: 空のターゲットリストでもエラーにならない
        // given (前提条件):
        let (pusher, _clients) = create_test_pusher();

        // when (操作):
        let result = pusher.broadcast(&BroadcastGroup::default(), "Message").await;

        // then (期待する結果):
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_unregister_client_stops_delivery() {
        // テスト項目: 解放済みの接続はブロードキャストの宛先から外れる
        // given (前提条件):
        let (pusher, clients) = create_test_pusher();
        let (tx1, _rx1) = mpsc::unbounded_channel();
        pusher.register_client(conn("conn-a"), tx1).await;

        // when (操作):
        pusher.unregister_client(&conn("conn-a")).await;

        // then (期待する結果):
        assert!(clients.lock().await.is_empty());
    }
}
