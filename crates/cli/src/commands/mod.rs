pub(crate) mod backfill;
pub(crate) mod revert;
pub(crate) mod stats;
