//! UI 層
//!
//! axum ベースの HTTP / WebSocket サーバと、受信イベントのハンドラを
//! 提供します。

pub mod handler;
pub mod server;
pub mod signal;
pub mod state;

pub use server::Server;
