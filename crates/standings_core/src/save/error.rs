use thiserror::Error;

use crate::league::League;
use crate::table::TableError;

#[derive(Error, Debug)]
pub enum SaveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupted table: {0}")]
    Corrupted(#[from] TableError),

    #[error("Version mismatch: found {found}, expected {expected}")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Snapshot belongs to {found}, expected {expected}")]
    LeagueMismatch { found: League, expected: League },
}

impl SaveError {
    /// Whether retrying the same operation later can succeed. Everything
    /// else means the file on disk is unusable as-is.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SaveError::Io(_) => true,
            SaveError::Json(_) => false,
            SaveError::Corrupted(_) => false,
            SaveError::VersionMismatch { .. } => false,
            SaveError::LeagueMismatch { .. } => false,
        }
    }
}
