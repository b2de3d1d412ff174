//! WebSocket chat room server library.
//!
//! A single shared room: participants join over WebSocket, the full
//! append-only message log is broadcast to every member on join and on send,
//! and the live participant count is kept consistent across explicit leaves
//! and ungraceful disconnects.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// shared library
pub mod common;
