//! 接続とその参加者識別
//!
//! `ConnectionId` はトランスポート層が接続ごとに払い出す一意な識別子。
//! `ConnectionRegistry` は接続 ID と表示名の対応（参加者登録簿）を保持します。

use std::collections::HashMap;
use std::fmt;

use uuid::Uuid;

/// Unique identity of one live connection.
///
/// Owned by the transport layer; the coordinator holds only this key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new(id: String) -> Self {
        Self(id)
    }

    /// Generate a fresh connection id (UUID v4), assigned at socket accept.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity associated with one live connection inside the room.
///
/// Display names are not required to be unique and are not validated;
/// a "non-empty username" policy belongs to the collaborator issuing the join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub connection_id: ConnectionId,
    pub display_name: String,
}

impl Participant {
    pub fn new(connection_id: ConnectionId, display_name: String) -> Self {
        Self {
            connection_id,
            display_name,
        }
    }
}

/// Registry mapping each live connection to its participant identity.
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    participants: HashMap<ConnectionId, Participant>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the participant for its connection id.
    ///
    /// Overwriting a connection that rejoins without leaving is accepted
    /// (idempotent upsert) to tolerate duplicate join events.
    pub fn register(&mut self, participant: Participant) {
        self.participants
            .insert(participant.connection_id.clone(), participant);
    }

    /// Remove the participant if present. Absence is a valid, silent outcome.
    pub fn unregister(&mut self, connection_id: &ConnectionId) -> bool {
        self.participants.remove(connection_id).is_some()
    }

    pub fn count(&self) -> usize {
        self.participants.len()
    }

    /// Registered participants, sorted by connection id for consistent ordering.
    pub fn participants(&self) -> Vec<Participant> {
        let mut participants: Vec<Participant> = self.participants.values().cloned().collect();
        participants.sort_by(|a, b| a.connection_id.cmp(&b.connection_id));
        participants
    }
}
