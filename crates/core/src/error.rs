use std::result::Result as StdResult;

use thiserror::Error;

/// Domain-level errors for readtrack.
#[derive(Error, Debug)]
pub enum ReadTrackError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = StdResult<T, ReadTrackError>;
