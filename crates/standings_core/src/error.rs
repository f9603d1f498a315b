use thiserror::Error;

use crate::extract::ExtractError;
use crate::save::SaveError;

#[derive(Error, Debug)]
pub enum StandingsError {
    #[error("Unknown league: {0}")]
    UnknownLeague(String),

    #[error("Payload error: {0}")]
    Payload(#[from] ExtractError),

    #[error("Snapshot error: {0}")]
    Save(#[from] SaveError),
}

pub type Result<T> = std::result::Result<T, StandingsError>;
