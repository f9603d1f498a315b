//! Standings data structures.
//!
//! `TeamRecord` stores counters only. Every derived column (points,
//! win percentage, differential, games played) is computed on read so a
//! stale write can never leave it out of step with the counters.

use serde::{Deserialize, Serialize};

use crate::league::League;

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRecord {
    /// Stable short code, unique within a league (scoreboard abbreviation)
    pub team_key: String,

    /// Display name
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub wins: u32,

    #[serde(default)]
    pub losses: u32,

    /// Losses in overtime or shootout (two-points ruleset only)
    #[serde(default)]
    pub ot_losses: u32,

    /// Level results (win/loss/tie ruleset only)
    #[serde(default)]
    pub ties: u32,

    /// Goals or points scored
    #[serde(default)]
    pub points_for: u32,

    /// Goals or points conceded
    #[serde(default)]
    pub points_against: u32,
}

impl TeamRecord {
    pub fn new(team_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            team_key: team_key.into(),
            name: name.into(),
            wins: 0,
            losses: 0,
            ot_losses: 0,
            ties: 0,
            points_for: 0,
            points_against: 0,
        }
    }

    pub fn games_played(&self) -> u32 {
        self.wins
            .saturating_add(self.losses)
            .saturating_add(self.ot_losses)
            .saturating_add(self.ties)
    }

    /// Two points per win, one per overtime/shootout loss
    pub fn points(&self) -> u32 {
        self.wins.saturating_mul(2).saturating_add(self.ot_losses)
    }

    /// A tie counts as half a win. Zero games played reads as 0.0.
    pub fn win_percentage(&self) -> f64 {
        let played = self.games_played();
        if played == 0 {
            return 0.0;
        }
        (self.wins as f64 + 0.5 * self.ties as f64) / played as f64
    }

    pub fn point_differential(&self) -> i64 {
        self.points_for as i64 - self.points_against as i64
    }

    pub(crate) fn add_scores(&mut self, scored: u32, conceded: u32) {
        self.points_for = self.points_for.saturating_add(scored);
        self.points_against = self.points_against.saturating_add(conceded);
    }
}

/// Which side a final score favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Home,
    Away,
    Level,
}

/// One finished match observation. Never re-applied once its
/// `match_id` is in the league ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Stable across repeated polls of the same match
    pub match_id: String,
    pub league: League,
    pub home_team_key: String,
    pub away_team_key: String,
    pub home_score: u32,
    pub away_score: u32,
    /// Only meaningful for leagues that credit an extra-time loss
    pub was_overtime_or_shootout: bool,
}

impl MatchResult {
    pub fn outcome(&self) -> Outcome {
        use std::cmp::Ordering;

        match self.home_score.cmp(&self.away_score) {
            Ordering::Greater => Outcome::Home,
            Ordering::Less => Outcome::Away,
            Ordering::Equal => Outcome::Level,
        }
    }
}
