use std::cmp::Ordering;

use crate::models::{MatchResult, Outcome, TeamRecord};

pub(super) fn apply(home: &mut TeamRecord, away: &mut TeamRecord, result: &MatchResult) {
    match result.outcome() {
        Outcome::Home => {
            home.wins = home.wins.saturating_add(1);
            away.losses = away.losses.saturating_add(1);
        }
        Outcome::Away => {
            away.wins = away.wins.saturating_add(1);
            home.losses = home.losses.saturating_add(1);
        }
        Outcome::Level => {
            home.ties = home.ties.saturating_add(1);
            away.ties = away.ties.saturating_add(1);
        }
    }
}

/// Win percentage (tie = half a win), then point differential.
pub(super) fn compare(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.win_percentage()
        .total_cmp(&a.win_percentage())
        .then_with(|| b.point_differential().cmp(&a.point_differential()))
}
