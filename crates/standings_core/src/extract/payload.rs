//! Untrusted scoreboard shapes. Every field is optional; deciding what
//! is usable happens in the parent module.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub(super) struct RawEvent {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub competitions: Vec<RawCompetition>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawCompetition {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub status: Option<RawStatus>,
    #[serde(default)]
    pub competitors: Vec<RawCompetitor>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawStatus {
    #[serde(rename = "type", default)]
    pub status_type: Option<RawStatusType>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawStatusType {
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
    #[serde(rename = "shortDetail", default)]
    pub short_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawCompetitor {
    #[serde(rename = "homeAway", default)]
    pub home_away: Option<String>,
    #[serde(default)]
    pub score: Option<Value>,
    #[serde(default)]
    pub team: Option<RawTeam>,
}

#[derive(Debug, Deserialize)]
pub(super) struct RawTeam {
    #[serde(default)]
    pub abbreviation: Option<String>,
}

/// Ids arrive as strings or bare numbers.
pub(super) fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Highest score accepted from a payload. Anything above is garbage.
pub(super) const MAX_SCORE: u32 = 999;

/// Scores arrive as `"3"`, `3`, or `{"value": 3.0, "displayValue": "3"}`.
pub(super) fn score_value(value: &Value) -> Option<u32> {
    let score = match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => match n.as_u64() {
            Some(v) => u32::try_from(v).ok(),
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && *f <= MAX_SCORE as f64)
                .map(|f| f.round() as u32),
        },
        Value::Object(map) => return map.get("value").and_then(score_value),
        _ => None,
    };
    score.filter(|s| *s <= MAX_SCORE)
}
