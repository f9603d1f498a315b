//! Season-start baseline tables
//!
//! Embedded with `include_str!` and parsed once. Used only when a league
//! has no persisted snapshot (first run, or after an operator reset).

use std::sync::OnceLock;

use serde::Deserialize;

use crate::league::League;
use crate::table::{StandingsGroup, StandingsTable};

pub const NHL_BASELINE_JSON: &str = include_str!("../data/baseline/nhl.json");
pub const NBA_BASELINE_JSON: &str = include_str!("../data/baseline/nba.json");
pub const NFL_BASELINE_JSON: &str = include_str!("../data/baseline/nfl.json");

#[derive(Debug, Deserialize)]
struct BaselineDoc {
    league: League,
    groups: Vec<StandingsGroup>,
}

static BASELINES: OnceLock<[Vec<StandingsGroup>; 3]> = OnceLock::new();

fn baselines() -> &'static [Vec<StandingsGroup>; 3] {
    BASELINES.get_or_init(|| {
        [
            parse(League::Nhl, NHL_BASELINE_JSON),
            parse(League::Nba, NBA_BASELINE_JSON),
            parse(League::Nfl, NFL_BASELINE_JSON),
        ]
    })
}

fn parse(league: League, json: &str) -> Vec<StandingsGroup> {
    let doc: BaselineDoc =
        serde_json::from_str(json).expect("Embedded baseline table JSON is corrupted");
    assert_eq!(doc.league, league, "Embedded baseline table filed under the wrong league");

    doc.groups
}

/// Fresh season-start table: every counter zero.
pub fn baseline_table(league: League) -> StandingsTable {
    let groups = baselines()[league.index()].clone();
    StandingsTable::new(league, groups).expect("Embedded baseline table has duplicate teams")
}
