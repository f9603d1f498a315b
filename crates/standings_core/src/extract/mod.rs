//! Match Result Extractor
//!
//! Turns a raw scoreboard payload into typed `MatchResult`s for finished
//! matches. This is the only place that deals with the payload being
//! untrustworthy: each event either yields a result or a skip decision.
//! Extraction never looks at league state or the ledger.

mod payload;
mod status;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::league::League;
use crate::models::MatchResult;

use payload::{id_text, score_value, RawCompetitor, RawEvent};

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Payload has no events list")]
    MissingEvents,
}

/// Why an event produced no result. Not an error: logged and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Skip {
    Unreadable,
    NotFinished,
    MissingMatchId,
    MissingParticipant(&'static str),
    SameTeamBothSides,
}

/// Parse `raw` and return every finished match it reports, in payload order.
pub fn extract(league: League, raw: &str) -> Result<Vec<MatchResult>, ExtractError> {
    let value: Value = serde_json::from_str(raw)?;
    extract_value(league, &value)
}

pub fn extract_value(league: League, payload: &Value) -> Result<Vec<MatchResult>, ExtractError> {
    let events = payload
        .get("events")
        .and_then(Value::as_array)
        .ok_or(ExtractError::MissingEvents)?;

    let mut results = Vec::with_capacity(events.len());
    for (idx, event) in events.iter().enumerate() {
        match parse_event(league, event) {
            Ok(result) => results.push(result),
            Err(Skip::NotFinished) => {}
            Err(skip) => {
                tracing::debug!(
                    %league,
                    event_index = idx,
                    reason = ?skip,
                    "Skipping scoreboard event"
                );
            }
        }
    }

    Ok(results)
}

fn parse_event(league: League, event: &Value) -> Result<MatchResult, Skip> {
    let event: RawEvent = RawEvent::deserialize(event).map_err(|_| Skip::Unreadable)?;
    let competition = event.competitions.first();

    let status = competition
        .and_then(|c| c.status.as_ref())
        .and_then(|s| s.status_type.as_ref())
        .or_else(|| event.status.as_ref().and_then(|s| s.status_type.as_ref()))
        .ok_or(Skip::NotFinished)?;

    if !status::is_finished(status) {
        return Err(Skip::NotFinished);
    }

    let match_id = event
        .id
        .as_ref()
        .and_then(id_text)
        .or_else(|| competition.and_then(|c| c.id.as_ref()).and_then(id_text))
        .ok_or(Skip::MissingMatchId)?;

    let competitors = competition.map(|c| c.competitors.as_slice()).unwrap_or_default();
    let (home_team_key, home_score) =
        participant(competitors, "home").ok_or(Skip::MissingParticipant("home"))?;
    let (away_team_key, away_score) =
        participant(competitors, "away").ok_or(Skip::MissingParticipant("away"))?;

    if home_team_key == away_team_key {
        return Err(Skip::SameTeamBothSides);
    }

    let home_score = score_or_zero(&match_id, &home_team_key, home_score);
    let away_score = score_or_zero(&match_id, &away_team_key, away_score);

    Ok(MatchResult {
        match_id,
        league,
        home_team_key,
        away_team_key,
        home_score,
        away_score,
        was_overtime_or_shootout: status::went_to_extra_time(status),
    })
}

/// Team key (upper-cased) and raw score of the competitor tagged `side`.
fn participant(competitors: &[RawCompetitor], side: &str) -> Option<(String, Option<u32>)> {
    let competitor = competitors.iter().find(|c| {
        c.home_away.as_deref().is_some_and(|h| h.eq_ignore_ascii_case(side))
    })?;

    let key = competitor
        .team
        .as_ref()
        .and_then(|t| t.abbreviation.as_deref())
        .map(str::trim)
        .filter(|k| !k.is_empty())?
        .to_ascii_uppercase();

    Some((key, competitor.score.as_ref().and_then(score_value)))
}

fn score_or_zero(match_id: &str, team_key: &str, score: Option<u32>) -> u32 {
    score.unwrap_or_else(|| {
        tracing::debug!(match_id, team_key, "Missing or unparseable score, counting as 0");
        0
    })
}
