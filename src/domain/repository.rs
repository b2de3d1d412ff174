//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各操作は失敗しません（登録は上書き、削除は冪等な no-op として
//! 常に成立するため）。メンバーシップ系の bool 戻り値は「実際に削除が
//! 発生したか」を表し、カウント再配信の要否判断に使われます。

use async_trait::async_trait;

use super::message::ChatMessage;
use super::message_pusher::BroadcastGroup;
use super::participant::{ConnectionId, Participant};

/// Room Repository trait
///
/// UseCase 層はこの trait に依存し、Infrastructure 層の具体的な実装
/// （インメモリなど）には依存しない。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// 参加者を登録（同一接続 ID は上書き）
    async fn register_participant(&self, participant: Participant);

    /// 参加者の登録を解除。削除が発生したかを返す（冪等）
    async fn unregister_participant(&self, connection_id: &ConnectionId) -> bool;

    /// 登録済み参加者数
    async fn participant_count(&self) -> usize;

    /// 登録済み参加者の一覧（接続 ID 順）
    async fn participants(&self) -> Vec<Participant>;

    /// 接続をルームに参加させる（冪等）
    async fn join_room(&self, connection_id: ConnectionId);

    /// 接続をルームから退出させる。削除が発生したかを返す（冪等）
    async fn leave_room(&self, connection_id: &ConnectionId) -> bool;

    /// 現在のメンバー数（オンライン数）
    async fn member_count(&self) -> usize;

    /// 現在のメンバーのブロードキャストグループ（取得時点のコピー）
    async fn broadcast_group(&self) -> BroadcastGroup;

    /// メッセージをログ末尾に追記
    async fn append_message(&self, message: ChatMessage);

    /// メッセージログ全体のスナップショット
    async fn message_snapshot(&self) -> Vec<ChatMessage>;
}
