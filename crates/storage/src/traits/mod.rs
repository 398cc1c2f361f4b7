//! Storage backend trait abstraction
//!
//! Async domain traits implemented by the SQLite `Storage` (through
//! `spawn_blocking`) and by `PgStorage`.

pub mod forum;
pub mod reads;

pub use forum::ForumStore;
pub use reads::{PostReadStore, ReadMigrationStore, StatsStore};
