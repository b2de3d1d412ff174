//! Data Transfer Objects (DTOs) for the chat room server.
//!
//! DTOs are organized by protocol:
//! - `websocket`: WebSocket event DTOs (inbound and outbound)
//! - `http`: HTTP API response DTOs
//!
//! `conversion` maps between domain models and DTOs.

pub mod conversion;
pub mod http;
pub mod websocket;
