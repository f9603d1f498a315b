use std::cmp::Ordering;

use crate::models::{MatchResult, Outcome, TeamRecord};

pub(super) fn apply(home: &mut TeamRecord, away: &mut TeamRecord, result: &MatchResult) {
    let (winner, loser) = match result.outcome() {
        Outcome::Home => (home, away),
        Outcome::Away | Outcome::Level => (away, home),
    };

    winner.wins = winner.wins.saturating_add(1);
    loser.losses = loser.losses.saturating_add(1);
}

/// Win percentage only.
pub(super) fn compare(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.win_percentage().total_cmp(&a.win_percentage())
}
