//! Repository 実装
//!
//! - `inmemory`: HashMap / Vec ベースのインメモリ実装
//! - 将来的に: PostgreSQL, Redis など

pub mod inmemory;

pub use inmemory::InMemoryRoomRepository;
