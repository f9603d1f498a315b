use std::cmp::Ordering;

use crate::models::{MatchResult, Outcome, TeamRecord};

/// Winner +1 win; loser +1 extra-time loss or +1 regulation loss.
/// A level score cannot be decided here and goes to the away side.
pub(super) fn apply(home: &mut TeamRecord, away: &mut TeamRecord, result: &MatchResult) {
    let (winner, loser) = match result.outcome() {
        Outcome::Home => (home, away),
        Outcome::Away | Outcome::Level => (away, home),
    };

    winner.wins = winner.wins.saturating_add(1);
    if result.was_overtime_or_shootout {
        loser.ot_losses = loser.ot_losses.saturating_add(1);
    } else {
        loser.losses = loser.losses.saturating_add(1);
    }
}

/// Points, then goal differential.
pub(super) fn compare(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.points()
        .cmp(&a.points())
        .then_with(|| b.point_differential().cmp(&a.point_differential()))
}
