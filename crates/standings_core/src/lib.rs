//! # standings_core - Deduplicated League Standings Engine
//!
//! Keeps an authoritative standings table per league, fed by repeated
//! scoreboard polls. A finished match is applied exactly once no matter
//! how many consecutive polls report it.
//!
//! ## Pipeline
//! - `extract`: raw scoreboard payload → finished `MatchResult`s
//! - `ledger`: match ids already applied to a league
//! - `rules`: per-ruleset delta and sort order
//! - `table`: grouped `TeamRecord`s, re-sorted after each batch
//! - `save`: JSON snapshots that make the engine resumable
//! - `engine`: one update cycle per poll tick, single writer per league
//! - `format`: read-only projection for the rendering layer

pub mod baseline;
pub mod config;
pub mod engine;
pub mod error;
pub mod extract;
pub mod format;
pub mod ledger;
pub mod league;
pub mod models;
pub mod rules;
pub mod save;
pub mod table;

pub use config::EngineConfig;
pub use engine::{CycleReport, CycleWarning, StandingsEngine};
pub use error::{Result, StandingsError};
pub use extract::{extract, extract_value, ExtractError};
pub use format::{FormattedSection, FormattedStandings, StandingsRow};
pub use ledger::Ledger;
pub use league::League;
pub use models::{MatchResult, Outcome, TeamRecord};
pub use rules::{Columns, Ruleset};
pub use save::{SaveError, SnapshotStore};
pub use table::{StandingsGroup, StandingsTable, UnknownTeam};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
