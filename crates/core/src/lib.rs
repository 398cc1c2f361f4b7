//! Core types for readtrack
//!
//! Domain records shared by the storage and CLI crates, plus the
//! storage-agnostic planner that expands legacy read markers into
//! per-post ones.

mod backfill;
pub mod constants;
mod cutoff;
pub mod env_config;
mod error;
mod forum;
mod ids;
mod reads;

pub use backfill::*;
pub use constants::*;
pub use cutoff::*;
pub use error::*;
pub use forum::*;
pub use ids::*;
pub use reads::*;
