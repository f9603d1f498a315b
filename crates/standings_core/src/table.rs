//! Standings Table
//!
//! One league's team records, grouped by conference or division. Rows
//! are mutated only through the league's ruleset and re-sorted per group
//! after each batch.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::league::League;
use crate::models::{MatchResult, TeamRecord};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsGroup {
    pub name: String,
    pub teams: Vec<TeamRecord>,
}

/// A finished match names a team the table does not know. Usually an
/// abbreviation mismatch upstream.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown team '{team_key}' in match {match_id}")]
pub struct UnknownTeam {
    pub match_id: String,
    pub team_key: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("Team '{0}' appears more than once")]
    DuplicateTeam(String),

    #[error("Team with empty key")]
    EmptyTeamKey,
}

#[derive(Debug, Clone)]
pub struct StandingsTable {
    league: League,
    groups: Vec<StandingsGroup>,
    /// team_key → (group, row); rebuilt whenever rows move
    index: HashMap<String, (usize, usize)>,
}

impl StandingsTable {
    pub fn new(league: League, groups: Vec<StandingsGroup>) -> Result<Self, TableError> {
        let mut table = Self {
            league,
            groups,
            index: HashMap::new(),
        };
        table.reindex()?;
        Ok(table)
    }

    pub fn league(&self) -> League {
        self.league
    }

    pub fn groups(&self) -> &[StandingsGroup] {
        &self.groups
    }

    pub fn team(&self, team_key: &str) -> Option<&TeamRecord> {
        let &(g, r) = self.index.get(team_key)?;
        Some(&self.groups[g].teams[r])
    }

    pub fn team_count(&self) -> usize {
        self.index.len()
    }

    pub fn teams(&self) -> impl Iterator<Item = &TeamRecord> {
        self.groups.iter().flat_map(|g| g.teams.iter())
    }

    /// Apply one result to both participants, or to neither when either
    /// key is unknown.
    pub fn apply(&mut self, result: &MatchResult) -> Result<(), UnknownTeam> {
        let home_at = self.locate(&result.match_id, &result.home_team_key)?;
        let away_at = self.locate(&result.match_id, &result.away_team_key)?;

        let (home, away) = self.league.ruleset().apply(
            &self.groups[home_at.0].teams[home_at.1],
            &self.groups[away_at.0].teams[away_at.1],
            result,
        );

        self.groups[home_at.0].teams[home_at.1] = home;
        self.groups[away_at.0].teams[away_at.1] = away;
        Ok(())
    }

    /// Stable sort of every group with the league comparator.
    pub fn sort(&mut self) {
        let ruleset = self.league.ruleset();
        for group in &mut self.groups {
            group.teams.sort_by(|a, b| ruleset.compare(a, b));
        }
        // keys were unique before sorting, so this cannot fail
        let _ = self.reindex();
    }

    fn locate(&self, match_id: &str, team_key: &str) -> Result<(usize, usize), UnknownTeam> {
        self.index.get(team_key).copied().ok_or_else(|| UnknownTeam {
            match_id: match_id.to_string(),
            team_key: team_key.to_string(),
        })
    }

    fn reindex(&mut self) -> Result<(), TableError> {
        self.index.clear();
        for (g, group) in self.groups.iter().enumerate() {
            for (r, team) in group.teams.iter().enumerate() {
                if team.team_key.is_empty() {
                    return Err(TableError::EmptyTeamKey);
                }
                if self.index.insert(team.team_key.clone(), (g, r)).is_some() {
                    return Err(TableError::DuplicateTeam(team.team_key.clone()));
                }
            }
        }
        Ok(())
    }
}

impl From<StandingsTable> for Vec<StandingsGroup> {
    fn from(table: StandingsTable) -> Self {
        table.groups
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, keys: &[&str]) -> StandingsGroup {
        StandingsGroup {
            name: name.to_string(),
            teams: keys.iter().map(|k| TeamRecord::new(*k, *k)).collect(),
        }
    }

    fn result(id: &str, home: &str, away: &str, hs: u32, aws: u32) -> MatchResult {
        MatchResult {
            match_id: id.to_string(),
            league: League::Nhl,
            home_team_key: home.to_string(),
            away_team_key: away.to_string(),
            home_score: hs,
            away_score: aws,
            was_overtime_or_shootout: false,
        }
    }

    #[test]
    fn test_rejects_duplicate_keys() {
        let err = StandingsTable::new(League::Nhl, vec![group("A", &["BOS"]), group("B", &["BOS"])])
            .unwrap_err();
        assert_eq!(err, TableError::DuplicateTeam("BOS".to_string()));
    }

    #[test]
    fn test_apply_across_groups() {
        let mut table =
            StandingsTable::new(League::Nhl, vec![group("East", &["BOS"]), group("West", &["EDM"])])
                .unwrap();

        table.apply(&result("1", "EDM", "BOS", 5, 1)).unwrap();

        assert_eq!(table.team("EDM").unwrap().wins, 1);
        assert_eq!(table.team("BOS").unwrap().losses, 1);
    }

    #[test]
    fn test_unknown_team_leaves_table_untouched() {
        let mut table =
            StandingsTable::new(League::Nhl, vec![group("East", &["BOS", "TOR"])]).unwrap();

        let err = table.apply(&result("1", "BOS", "QUE", 3, 2)).unwrap_err();

        assert_eq!(err.team_key, "QUE");
        assert_eq!(err.match_id, "1");
        assert_eq!(table.team("BOS").unwrap().games_played(), 0);
    }

    #[test]
    fn test_sort_orders_groups_and_reindexes() {
        let mut table =
            StandingsTable::new(League::Nhl, vec![group("East", &["BOS", "TOR", "MTL"])]).unwrap();

        table.apply(&result("1", "MTL", "BOS", 4, 1)).unwrap();
        table.apply(&result("2", "TOR", "BOS", 2, 1)).unwrap();
        table.sort();

        let order: Vec<&str> =
            table.groups()[0].teams.iter().map(|t| t.team_key.as_str()).collect();
        assert_eq!(order, vec!["MTL", "TOR", "BOS"]);
        assert_eq!(table.team("BOS").unwrap().losses, 2);

        // sorting a sorted table moves nothing
        let before = table.groups().to_vec();
        table.sort();
        assert_eq!(table.groups(), before.as_slice());
    }
}
