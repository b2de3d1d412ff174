//! ルーム集約
//!
//! `Membership` はルームのブロードキャスト対象となる接続 ID の集合。
//! `Room` は参加者登録簿・メンバーシップ・メッセージログを一つの集約として
//! まとめ、Repository の単一ロック境界の内側で排他制御されます。

use std::collections::HashSet;

use super::message::{ChatMessage, MessageLog, Timestamp};
use super::message_pusher::BroadcastGroup;
use super::participant::{ConnectionId, ConnectionRegistry, Participant};

/// The set of connections currently joined to the room.
///
/// A connection id appears at most once; the set size is the externally
/// reported online count.
#[derive(Debug, Default)]
pub struct Membership {
    members: HashSet<ConnectionId>,
}

impl Membership {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a connection to the room. Joining twice has no additional effect.
    pub fn join(&mut self, connection_id: ConnectionId) {
        self.members.insert(connection_id);
    }

    /// Remove a connection, reporting whether it was present. Idempotent.
    pub fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        self.members.remove(connection_id)
    }

    pub fn size(&self) -> usize {
        self.members.len()
    }

    /// Point-in-time copy of the member set, used as the fan-out target for
    /// one broadcast call. Derived each time, never stored.
    pub fn broadcast_group(&self) -> BroadcastGroup {
        self.members.iter().cloned().collect()
    }
}

/// The single shared room: registry, membership, and message log as one
/// logical unit.
///
/// All three are mutated together per inbound event, so they live behind one
/// mutual-exclusion boundary (see `InMemoryRoomRepository`).
#[derive(Debug)]
pub struct Room {
    registry: ConnectionRegistry,
    membership: Membership,
    log: MessageLog,
}

impl Room {
    /// Create the room at process start, with the log seeded by the
    /// bootstrap message.
    pub fn new(created_at: Timestamp) -> Self {
        Self {
            registry: ConnectionRegistry::new(),
            membership: Membership::new(),
            log: MessageLog::with_bootstrap(created_at),
        }
    }

    pub fn register_participant(&mut self, participant: Participant) {
        self.registry.register(participant);
    }

    pub fn unregister_participant(&mut self, connection_id: &ConnectionId) -> bool {
        self.registry.unregister(connection_id)
    }

    pub fn participant_count(&self) -> usize {
        self.registry.count()
    }

    pub fn participants(&self) -> Vec<Participant> {
        self.registry.participants()
    }

    pub fn join(&mut self, connection_id: ConnectionId) {
        self.membership.join(connection_id);
    }

    pub fn leave(&mut self, connection_id: &ConnectionId) -> bool {
        self.membership.leave(connection_id)
    }

    pub fn member_count(&self) -> usize {
        self.membership.size()
    }

    pub fn broadcast_group(&self) -> BroadcastGroup {
        self.membership.broadcast_group()
    }

    pub fn append_message(&mut self, message: ChatMessage) {
        self.log.append(message);
    }

    pub fn message_snapshot(&self) -> Vec<ChatMessage> {
        self.log.snapshot()
    }
}
