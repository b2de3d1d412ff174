//! チャットメッセージとメッセージログ
//!
//! `ChatMessage` は追記後に変更されない値。`MessageLog` は追記専用の
//! 順序付きシーケンスで、ルーム全参加者の共有リードモデルです。
//! プロセス起動時に Server 名義のブートストラップメッセージを1件保持します。

/// The bootstrap message present before any participant joins.
pub const BOOTSTRAP_MESSAGE_ID: &str = "Server_id_1234";
pub const BOOTSTRAP_AUTHOR: &str = "Server";
pub const BOOTSTRAP_BODY: &str = "Hello Fellas";

/// Unix timestamp in milliseconds (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(millis: i64) -> Self {
        Self(millis)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// A single chat entry. Immutable once appended to the log.
///
/// The coordinator does not validate `author` or `body`; empty or oversized
/// bodies are accepted and content filtering is a caller concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: String,
    pub author: String,
    pub body: String,
    pub created_at: Timestamp,
}

impl ChatMessage {
    pub fn new(id: String, author: String, body: String, created_at: Timestamp) -> Self {
        Self {
            id,
            author,
            body,
            created_at,
        }
    }

    /// The bootstrap message seeded into every new log.
    pub fn bootstrap(created_at: Timestamp) -> Self {
        Self::new(
            BOOTSTRAP_MESSAGE_ID.to_string(),
            BOOTSTRAP_AUTHOR.to_string(),
            BOOTSTRAP_BODY.to_string(),
            created_at,
        )
    }
}

/// Append-only ordered sequence of chat messages.
///
/// Insertion order is the causal send order as observed by the coordinator.
/// The log is never truncated for the lifetime of the process.
#[derive(Debug, Clone)]
pub struct MessageLog {
    entries: Vec<ChatMessage>,
}

impl MessageLog {
    /// Create a log seeded with the bootstrap message.
    pub fn with_bootstrap(created_at: Timestamp) -> Self {
        Self {
            entries: vec![ChatMessage::bootstrap(created_at)],
        }
    }

    pub fn append(&mut self, message: ChatMessage) {
        self.entries.push(message);
    }

    /// Full copy of the log, reflecting all appends ordered before this call.
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
