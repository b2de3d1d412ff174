//! UseCase: メッセージ送信処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - SendMessageUseCase::execute() メソッド
//! - メッセージ送信処理（ログへの追記、追記後スナップショットの取得、
//!   ブロードキャスト対象の選定）
//!
//! ### なぜこのテストが必要か
//! - 追記とスナップショット取得の順序を保証（追記後のログが配信される）
//! - 未参加の接続からの送信も追記されることを確認（送信者認証は非目標）
//! - 送信者自身もブロードキャスト対象に含まれることを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：メンバーからのメッセージ送信
//! - エッジケース：未参加接続からの送信、メンバー不在時の送信

use std::sync::Arc;

use crate::domain::{BroadcastGroup, ChatMessage, MessagePushError, MessagePusher, RoomRepository};

use super::RoomUpdate;

/// メッセージ送信のユースケース
///
/// 送信は接続状態を変えません。参加状態のチェックも行いません
/// （未参加の接続からの送信もログへ追記されます）。追記後のログ全体が
/// 現在のメンバーシップへブロードキャストされます。
pub struct SendMessageUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl SendMessageUseCase {
    /// 新しい SendMessageUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// メッセージ送信を実行
    ///
    /// # Arguments
    ///
    /// * `message` - 追記するメッセージ（本文の検証は行わない）
    ///
    /// # Returns
    ///
    /// 追記後のグループ・カウント・ログスナップショット
    pub async fn execute(&self, message: ChatMessage) -> RoomUpdate {
        // 1. ログ末尾へ追記
        self.repository.append_message(message).await;

        // 2. 追記後のスナップショットと現在のグループを取得
        let group = self.repository.broadcast_group().await;
        let member_count = group.len();
        let messages = self.repository.message_snapshot().await;

        RoomUpdate {
            group,
            member_count,
            messages,
        }
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
