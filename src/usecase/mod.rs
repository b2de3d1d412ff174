//! UseCase 層
//!
//! 受信イベント（join / send / leave / drop）ごとの状態遷移を実装します。
//! 各 UseCase は Repository と MessagePusher の trait にのみ依存します。
//!
//! 遷移自体は失敗しません（fail-soft）：登録は上書き、削除は冪等な no-op、
//! ブロードキャストはベストエフォートです。

mod join_room;
mod leave_room;
mod room_state;
mod send_message;

pub use join_room::JoinRoomUseCase;
pub use leave_room::{CountUpdate, LeaveOutcome, LeaveRoomUseCase};
pub use room_state::{GetRoomStateUseCase, RoomState};
pub use send_message::SendMessageUseCase;

use crate::domain::{BroadcastGroup, ChatMessage};

/// Point-in-time view of the room captured together with a mutation.
///
/// `group` and `member_count` are consistent with each other (the count is
/// the group size); `messages` reflects all appends ordered before the
/// capture in the single-writer timeline.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomUpdate {
    /// Fan-out target for this update.
    pub group: BroadcastGroup,
    /// Online count at capture time.
    pub member_count: usize,
    /// Full message log snapshot at capture time.
    pub messages: Vec<ChatMessage>,
}
