use anyhow::Result;
use readtrack_core::{configured_cutoff_days, BackfillReport, ReadCutoff};
use readtrack_storage::{PostReadStore, ReadMigrationStore, StorageBackend, StorageError};
use serde::Serialize;

#[derive(Serialize)]
struct BackfillOutput {
    backend: &'static str,
    cutoff: ReadCutoff,
    report: BackfillReport,
}

pub(crate) async fn run(
    backend: &StorageBackend,
    cutoff_days: Option<u32>,
    allow_duplicates: bool,
) -> Result<()> {
    let cutoff = ReadCutoff::from_days(cutoff_days.unwrap_or_else(configured_cutoff_days))?;

    tracing::info!(
        backend = backend.kind(),
        days = cutoff.days(),
        cutoff = %cutoff.at(),
        "starting post-read backfill"
    );
    let report = if allow_duplicates {
        let existing = backend.count_post_reads().await?;
        if existing > 0 {
            tracing::warn!(
                existing,
                "post reads already exist, overlapping markers will be duplicated"
            );
        }
        backend.backfill_post_reads(cutoff).await?
    } else {
        match backend.backfill_post_reads_if_empty(cutoff).await {
            Ok(report) => report,
            Err(err @ StorageError::PostReadsExist(_)) => anyhow::bail!(
                "{err}; run `readtrack revert --yes` first or pass --allow-duplicates"
            ),
            Err(err) => return Err(err.into()),
        }
    };

    let output = BackfillOutput { backend: backend.kind(), cutoff, report };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
