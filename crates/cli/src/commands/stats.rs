use anyhow::Result;
use readtrack_storage::{StatsStore, StorageBackend};

pub(crate) async fn run(backend: &StorageBackend) -> Result<()> {
    let stats = backend.get_stats().await?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}
