//! ドメイン層
//!
//! チャットルームのエンティティ・値オブジェクトと、ドメイン層が必要とする
//! インターフェース（Repository, MessagePusher）を定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

mod error;
mod message;
mod message_pusher;
mod participant;
mod repository;
mod room;

pub use error::MessagePushError;
pub use message::{
    BOOTSTRAP_AUTHOR, BOOTSTRAP_BODY, BOOTSTRAP_MESSAGE_ID, ChatMessage, MessageLog, Timestamp,
};
pub use message_pusher::{BroadcastGroup, MessagePusher, PusherChannel};
pub use participant::{ConnectionId, ConnectionRegistry, Participant};
pub use repository::RoomRepository;
pub use room::{Membership, Room};
