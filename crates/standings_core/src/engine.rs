//! Standings Engine
//!
//! Runs one update cycle per poll tick:
//! extract → filter against ledger → apply → sort → persist → project.
//!
//! Each league's table and ledger sit behind their own mutex, so a cycle
//! is a single critical section for that league while other leagues
//! update concurrently. There is no process-wide state; the engine owns
//! every `LeagueState`.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::baseline::baseline_table;
use crate::config::EngineConfig;
use crate::extract::extract;
use crate::format::FormattedStandings;
use crate::league::League;
use crate::ledger::Ledger;
use crate::models::{MatchResult, Outcome};
use crate::save::{SaveError, SnapshotStore};
use crate::table::StandingsTable;

/// Non-fatal events of one cycle. None of them stops the caller from
/// getting a usable standings view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleWarning {
    /// Payload could not be parsed; previous standings returned unchanged
    MalformedPayload(String),
    /// Match skipped and left out of the ledger so it can be retried
    UnknownTeam { match_id: String, team_key: String },
    /// Level score under a ruleset without draws (usually missing scores)
    LevelScore { match_id: String },
    /// Write failed; in-memory state advanced and the next cycle retries
    PersistFailed(String),
    /// Stored snapshot was unusable; league restarted from baseline
    SnapshotDiscarded(String),
    /// Table found without its ledger; already-counted matches cannot be
    /// told apart from new ones
    LedgerMissing,
    /// Snapshot could not be read right now; nothing applied this cycle
    SnapshotUnavailable(String),
}

#[derive(Debug, Clone)]
pub struct CycleReport {
    pub league: League,
    pub standings: FormattedStandings,
    /// Match ids newly applied this cycle, in payload order
    pub applied: Vec<String>,
    /// Whether this cycle wrote the snapshot successfully
    pub persisted: bool,
    pub warnings: Vec<CycleWarning>,
}

impl CycleReport {
    pub fn changed(&self) -> bool {
        !self.applied.is_empty()
    }
}

/// One league's table plus the ids already applied to it. Always
/// mutated together.
#[derive(Debug)]
struct LeagueState {
    table: StandingsTable,
    ledger: Ledger,
    /// In-memory state is ahead of the last successful write
    dirty: bool,
}

impl LeagueState {
    fn baseline(league: League) -> Self {
        Self {
            table: baseline_table(league),
            ledger: Ledger::new(),
            dirty: false,
        }
    }

    fn restored(mut table: StandingsTable, ledger: Ledger) -> Self {
        table.sort();
        Self {
            table,
            ledger,
            dirty: false,
        }
    }

    /// Apply every result not yet in the ledger, in order. Returns the
    /// ids applied.
    fn apply_batch(
        &mut self,
        results: &[MatchResult],
        warnings: &mut Vec<CycleWarning>,
    ) -> Vec<String> {
        let league = self.table.league();
        let mut applied = Vec::new();

        for result in results {
            if self.ledger.already_applied(&result.match_id) {
                continue;
            }

            if let Err(unknown) = self.table.apply(result) {
                tracing::warn!(
                    %league,
                    match_id = %unknown.match_id,
                    team_key = %unknown.team_key,
                    "Skipping result for unknown team"
                );
                warnings.push(CycleWarning::UnknownTeam {
                    match_id: unknown.match_id,
                    team_key: unknown.team_key,
                });
                continue;
            }

            if !league.ruleset().allows_draws() && result.outcome() == Outcome::Level {
                tracing::warn!(
                    %league,
                    match_id = %result.match_id,
                    score = result.home_score,
                    "Level score in a league without draws, credited to the away side"
                );
                warnings.push(CycleWarning::LevelScore {
                    match_id: result.match_id.clone(),
                });
            }

            self.ledger.record(result.match_id.clone());
            applied.push(result.match_id.clone());
        }

        applied
    }
}

pub struct StandingsEngine {
    store: SnapshotStore,
    /// Indexed by `League::index`; `None` until first use
    slots: [Mutex<Option<LeagueState>>; 3],
}

impl StandingsEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_store(SnapshotStore::from_config(&config))
    }

    pub fn with_store(store: SnapshotStore) -> Self {
        Self {
            store,
            slots: [Mutex::new(None), Mutex::new(None), Mutex::new(None)],
        }
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Run one cycle for `league` with a freshly polled payload.
    pub fn update(&self, league: League, raw_payload: &str) -> CycleReport {
        let mut slot = self.lock(league);
        let mut warnings = Vec::new();

        let state = match self.ensure_loaded(&mut slot, league, &mut warnings) {
            Some(state) => state,
            None => {
                return CycleReport {
                    league,
                    standings: FormattedStandings::from_table(&baseline_table(league)),
                    applied: Vec::new(),
                    persisted: false,
                    warnings,
                };
            }
        };

        let results = match extract(league, raw_payload) {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!(
                    %league,
                    error = %e,
                    "Malformed scoreboard payload, keeping previous standings"
                );
                warnings.push(CycleWarning::MalformedPayload(e.to_string()));
                return CycleReport {
                    league,
                    standings: FormattedStandings::from_table(&state.table),
                    applied: Vec::new(),
                    persisted: false,
                    warnings,
                };
            }
        };

        let applied = state.apply_batch(&results, &mut warnings);
        if !applied.is_empty() {
            state.table.sort();
            state.dirty = true;
            tracing::info!(
                %league,
                applied = applied.len(),
                finished = results.len(),
                ledger = state.ledger.len(),
                "Applied new results"
            );
        } else {
            tracing::debug!(%league, finished = results.len(), "No new results this cycle");
        }

        let persisted = state.dirty && self.persist(league, state, &mut warnings);

        CycleReport {
            league,
            standings: FormattedStandings::from_table(&state.table),
            applied,
            persisted,
            warnings,
        }
    }

    /// Current standings without applying anything.
    pub fn standings(&self, league: League) -> FormattedStandings {
        let mut slot = self.lock(league);
        let mut warnings = Vec::new();

        match self.ensure_loaded(&mut slot, league, &mut warnings) {
            Some(state) => FormattedStandings::from_table(&state.table),
            None => FormattedStandings::from_table(&baseline_table(league)),
        }
    }

    /// Number of match ids applied to `league` so far.
    pub fn applied_count(&self, league: League) -> usize {
        let mut slot = self.lock(league);
        let mut warnings = Vec::new();

        self.ensure_loaded(&mut slot, league, &mut warnings)
            .map_or(0, |state| state.ledger.len())
    }

    /// Operator reset: delete the league's snapshot files and go back to
    /// the baseline table with an empty ledger.
    pub fn reset(&self, league: League) -> Result<(), SaveError> {
        let mut slot = self.lock(league);

        self.store.clear(league)?;
        *slot = Some(LeagueState::baseline(league));

        tracing::info!(%league, "Standings reset to season start");
        Ok(())
    }

    fn lock(&self, league: League) -> MutexGuard<'_, Option<LeagueState>> {
        self.slots[league.index()].lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Load the league on first use. `None` means the snapshot exists
    /// but cannot be read right now; the slot stays empty so the next
    /// cycle tries again instead of overwriting it with a baseline.
    fn ensure_loaded<'a>(
        &self,
        slot: &'a mut Option<LeagueState>,
        league: League,
        warnings: &mut Vec<CycleWarning>,
    ) -> Option<&'a mut LeagueState> {
        if slot.is_none() {
            match self.load_state(league, warnings) {
                Ok(state) => *slot = Some(state),
                Err(e) => {
                    tracing::warn!(
                        %league,
                        error = %e,
                        "Snapshot unavailable, serving baseline view"
                    );
                    warnings.push(CycleWarning::SnapshotUnavailable(e.to_string()));
                    return None;
                }
            }
        }
        slot.as_mut()
    }

    /// Only recoverable (I/O) errors are returned. Unusable files fall
    /// back to the baseline with a warning.
    fn load_state(
        &self,
        league: League,
        warnings: &mut Vec<CycleWarning>,
    ) -> Result<LeagueState, SaveError> {
        let table = match self.store.load_table(league) {
            Ok(Some(table)) => table,
            Ok(None) => {
                tracing::info!(%league, "No snapshot found, starting from baseline table");
                return Ok(LeagueState::baseline(league));
            }
            Err(e) if e.is_recoverable() => return Err(e),
            Err(e) => return Ok(discard(league, e, warnings)),
        };

        match self.store.load_ledger(league) {
            Ok(Some(ledger)) => {
                tracing::info!(%league, ledger = ledger.len(), "Restored standings snapshot");
                Ok(LeagueState::restored(table, ledger))
            }
            Ok(None) => {
                tracing::warn!(
                    %league,
                    "Table snapshot has no ledger; matches still on the scoreboard will be counted again"
                );
                warnings.push(CycleWarning::LedgerMissing);
                Ok(LeagueState::restored(table, Ledger::new()))
            }
            Err(e) if e.is_recoverable() => Err(e),
            Err(e) => Ok(discard(league, e, warnings)),
        }
    }

    fn persist(
        &self,
        league: League,
        state: &mut LeagueState,
        warnings: &mut Vec<CycleWarning>,
    ) -> bool {
        match self.store.save(league, &state.table, &state.ledger) {
            Ok(()) => {
                state.dirty = false;
                true
            }
            Err(e) => {
                tracing::warn!(
                    %league,
                    error = %e,
                    "Failed to persist standings, will retry next cycle"
                );
                warnings.push(CycleWarning::PersistFailed(e.to_string()));
                false
            }
        }
    }
}

fn discard(league: League, error: SaveError, warnings: &mut Vec<CycleWarning>) -> LeagueState {
    tracing::warn!(
        %league,
        error = %error,
        "Discarding unusable snapshot, starting from baseline table"
    );
    warnings.push(CycleWarning::SnapshotDiscarded(error.to_string()));
    LeagueState::baseline(league)
}
