//! UseCase: ルーム参加処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - 参加処理（登録簿への upsert、メンバーシップへの冪等な追加、
//!   カウントとログスナップショットの取得）
//!
//! ### なぜこのテストが必要か
//! - 参加時にグループ全体へ送るカウントとログが一貫して取得されることを保証
//! - 重複 join がカウントを二重に増やさないことを確認
//! - 表示名が検証されない（空文字も受理）ことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：新規参加者の join
//! - エッジケース：同一接続の重複 join、同名の別接続、空の表示名

use std::sync::Arc;

use crate::domain::{
    BroadcastGroup, ConnectionId, MessagePushError, MessagePusher, Participant, PusherChannel,
    RoomRepository,
};

use super::RoomUpdate;

/// ルーム参加のユースケース
///
/// 遷移: `Disconnected → Joined`。登録簿に参加者を upsert し、
/// メンバーシップに追加した上で、現在のグループ・カウント・ログ
/// スナップショットを一つの `RoomUpdate` として返します。
/// ログスナップショットはグループ全体へ再送されます（ログは冪等に同一で
/// あり、接続ごとの配信カーソルを持たないためです）。
pub struct JoinRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    /// MessagePusher（メッセージ通知の抽象化）
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            repository,
            message_pusher,
        }
    }

    /// ルーム参加を実行
    ///
    /// # Arguments
    ///
    /// * `connection_id` - 参加する接続の ID
    /// * `display_name` - 表示名（検証しない。空文字や重複も受理）
    /// * `sender` - この接続へのメッセージ送信用チャンネル
    ///
    /// # Returns
    ///
    /// 参加反映後のグループ・カウント・ログスナップショット
    pub async fn execute(
        &self,
        connection_id: ConnectionId,
        display_name: String,
        sender: PusherChannel,
    ) -> RoomUpdate {
        // 1. MessagePusher にこの接続のチャンネルを登録（再登録は上書き）
        self.message_pusher
            .register_client(connection_id.clone(), sender)
            .await;

        // 2. 登録簿へ upsert、メンバーシップへ冪等に追加
        self.repository
            .register_participant(Participant::new(connection_id.clone(), display_name))
            .await;
        self.repository.join_room(connection_id).await;

        // 3. 参加反映後のグループとログを取得
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
