//! MessagePusher trait 定義
//!
//! ドメイン層が必要とするメッセージ送信（ブロードキャスト）のインターフェース。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::error::MessagePushError;
use super::participant::ConnectionId;

/// Channel used to push serialized messages to one connection.
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Point-in-time set of connections that should receive one outbound update.
///
/// Always derived from the membership at the instant a broadcast is issued,
/// so a connection that left between two broadcasts is never sent a stale
/// "you are still a member" update.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BroadcastGroup(Vec<ConnectionId>);

impl BroadcastGroup {
    pub fn new(members: Vec<ConnectionId>) -> Self {
        Self(members)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, connection_id: &ConnectionId) -> bool {
        self.0.contains(connection_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConnectionId> {
        self.0.iter()
    }
}

impl FromIterator<ConnectionId> for BroadcastGroup {
    fn from_iter<T: IntoIterator<Item = ConnectionId>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for BroadcastGroup {
    type Item = ConnectionId;
    type IntoIter = std::vec::IntoIter<ConnectionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a BroadcastGroup {
    type Item = &'a ConnectionId;
    type IntoIter = std::slice::Iter<'a, ConnectionId>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// MessagePusher trait
///
/// UseCase 層はこの trait に依存し、WebSocket などの具体的な送信手段には
/// 依存しない。配送は接続ごとのベストエフォートであり、一部の宛先への
/// 送信失敗がブロードキャスト全体を失敗させることはない。
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// 接続の送信チャンネルを登録
    async fn register_client(&self, connection_id: ConnectionId, sender: PusherChannel);

    /// 接続の送信チャンネルを解放
    async fn unregister_client(&self, connection_id: &ConnectionId);

    /// グループ全員へメッセージを配送（ベストエフォート）
    async fn broadcast(
        &self,
        targets: &BroadcastGroup,
        content: &str,
    ) -> Result<(), MessagePushError>;
}
