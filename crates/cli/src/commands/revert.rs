use anyhow::Result;
use readtrack_storage::{ReadMigrationStore, StorageBackend};

pub(crate) async fn run(backend: &StorageBackend) -> Result<()> {
    let deleted = backend.revert_post_reads().await?;
    println!("{}", serde_json::to_string_pretty(&serde_json::json!({ "deleted": deleted }))?);
    Ok(())
}
