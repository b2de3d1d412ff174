//! ドメイン層のエラー型

use thiserror::Error;

/// Failure while pushing a message to connections.
///
/// Broadcast fan-out tolerates per-recipient failures; this error is only
/// surfaced when the push operation itself cannot proceed at all.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MessagePushError {
    #[error("failed to push message to connection '{0}': {1}")]
    PushFailed(String, String),
}
