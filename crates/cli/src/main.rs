mod commands;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use readtrack_core::env_config::env_non_empty;
use readtrack_storage::StorageBackend;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "readtrack")]
#[command(about = "Backfill per-post read markers from category and thread reads", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand category and thread reads into per-post read markers
    Backfill {
        /// Only posts from the last N days get a marker [default: $READTRACKER_CUTOFF_DAYS or 40]
        #[arg(short, long)]
        cutoff_days: Option<u32>,
        /// Run even when post reads already exist; overlapping markers are written again
        #[arg(long)]
        allow_duplicates: bool,
    },
    /// Delete EVERY per-post read marker, not only backfilled ones
    Revert {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Row counts of every read-tracker table
    Stats,
}

pub(crate) fn get_db_path() -> PathBuf {
    env_non_empty("READTRACK_DB_PATH").map_or_else(
        || {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("readtrack")
                .join("readtrack.db")
        },
        PathBuf::from,
    )
}

fn ensure_db_dir(db_path: &Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

#[cfg(feature = "postgres")]
async fn open_postgres() -> Result<Option<StorageBackend>> {
    match env_non_empty("DATABASE_URL") {
        Some(url) => Ok(Some(StorageBackend::new_postgres(&url).await?)),
        None => Ok(None),
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres() -> Result<Option<StorageBackend>> {
    Ok(None)
}

/// PostgreSQL when built with it and `DATABASE_URL` is set, SQLite otherwise.
async fn open_backend() -> Result<StorageBackend> {
    if let Some(backend) = open_postgres().await? {
        return Ok(backend);
    }
    let db_path = get_db_path();
    ensure_db_dir(&db_path)?;
    Ok(StorageBackend::new_sqlite(&db_path)?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Backfill { cutoff_days, allow_duplicates } => {
            let backend = open_backend().await?;
            commands::backfill::run(&backend, cutoff_days, allow_duplicates).await?;
        },
        Commands::Revert { yes } => {
            if !yes {
                anyhow::bail!(
                    "revert deletes every post read, including ones not created by a backfill; \
                     rerun with --yes to confirm"
                );
            }
            let backend = open_backend().await?;
            commands::revert::run(&backend).await?;
        },
        Commands::Stats => {
            let backend = open_backend().await?;
            commands::stats::run(&backend).await?;
        },
    }

    Ok(())
}
