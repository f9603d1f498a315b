//! Ruleset Table
//!
//! Maps each league's sport to two pure functions: the delta a finished
//! match applies to its two participants, and the ranking order used
//! when a group is re-sorted.
//!
//! - `TwoPoints` (hockey): 2 points per win, 1 for an extra-time loss
//! - `WinLoss` (basketball): ranked on win percentage
//! - `WinLossTie` (gridiron): ties count half, differential breaks ties
//!
//! Beyond the documented keys, sorting is stable: teams that compare
//! equal keep their previous relative order.

mod two_points;
mod win_loss;
mod win_loss_tie;

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::models::{MatchResult, TeamRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ruleset {
    TwoPoints,
    WinLoss,
    WinLossTie,
}

/// Optional columns the projection shows for a ruleset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub ot_losses: bool,
    pub ties: bool,
    pub points: bool,
    pub win_percentage: bool,
    pub games_back: bool,
}

impl Ruleset {
    /// Apply one finished match. Returns the updated (home, away) pair;
    /// the inputs are left untouched.
    pub fn apply(
        &self,
        home: &TeamRecord,
        away: &TeamRecord,
        result: &MatchResult,
    ) -> (TeamRecord, TeamRecord) {
        let mut home = home.clone();
        let mut away = away.clone();

        home.add_scores(result.home_score, result.away_score);
        away.add_scores(result.away_score, result.home_score);

        match self {
            Ruleset::TwoPoints => two_points::apply(&mut home, &mut away, result),
            Ruleset::WinLoss => win_loss::apply(&mut home, &mut away, result),
            Ruleset::WinLossTie => win_loss_tie::apply(&mut home, &mut away, result),
        }

        (home, away)
    }

    /// `Ordering::Less` means `a` ranks ahead of `b`.
    pub fn compare(&self, a: &TeamRecord, b: &TeamRecord) -> Ordering {
        match self {
            Ruleset::TwoPoints => two_points::compare(a, b),
            Ruleset::WinLoss => win_loss::compare(a, b),
            Ruleset::WinLossTie => win_loss_tie::compare(a, b),
        }
    }

    /// Whether a level score is a legitimate result under this ruleset.
    pub fn allows_draws(&self) -> bool {
        matches!(self, Ruleset::WinLossTie)
    }

    pub fn columns(&self) -> Columns {
        match self {
            Ruleset::TwoPoints => Columns {
                ot_losses: true,
                ties: false,
                points: true,
                win_percentage: false,
                games_back: false,
            },
            Ruleset::WinLoss => Columns {
                ot_losses: false,
                ties: false,
                points: false,
                win_percentage: true,
                games_back: true,
            },
            Ruleset::WinLossTie => Columns {
                ot_losses: false,
                ties: true,
                points: false,
                win_percentage: true,
                games_back: false,
            },
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::league::League;
    use crate::models::{MatchResult, TeamRecord};

    pub fn team(key: &str) -> TeamRecord {
        TeamRecord::new(key, key)
    }

    pub fn result(league: League, home: u32, away: u32, overtime: bool) -> MatchResult {
        MatchResult {
            match_id: "401".to_string(),
            league,
            home_team_key: "A".to_string(),
            away_team_key: "B".to_string(),
            home_score: home,
            away_score: away,
            was_overtime_or_shootout: overtime,
        }
    }
}
