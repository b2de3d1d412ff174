//! Server state shared across handlers.

use std::sync::Arc;

use crate::usecase::{
    GetRoomStateUseCase, JoinRoomUseCase, LeaveRoomUseCase, SendMessageUseCase,
};

/// Shared application state
pub struct AppState {
    /// JoinRoomUseCase（ルーム参加のユースケース）
    pub join_room_usecase: Arc<JoinRoomUseCase>,
    /// SendMessageUseCase（メッセージ送信のユースケース）
    pub send_message_usecase: Arc<SendMessageUseCase>,
    /// LeaveRoomUseCase（ルーム退出のユースケース、leave と drop で共有）
    pub leave_room_usecase: Arc<LeaveRoomUseCase>,
    /// GetRoomStateUseCase（ルーム状態取得のユースケース）
    pub get_room_state_usecase: Arc<GetRoomStateUseCase>,
}
