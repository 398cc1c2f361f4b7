//! Storage types shared across modules

use serde::{Deserialize, Serialize};

/// Row counts across the read-tracker tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct ReadTrackerStats {
    pub categories: u64,
    pub threads: u64,
    pub posts: u64,
    pub category_reads: u64,
    pub thread_reads: u64,
    pub post_reads: u64,
}
