use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::SaveError;
use super::SNAPSHOT_VERSION;
use crate::league::League;
use crate::ledger::Ledger;
use crate::table::{StandingsGroup, StandingsTable};

/// On-disk form of a league table
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TableSnapshot {
    /// Snapshot format version; files written before versioning read as 0
    #[serde(default)]
    pub version: u32,

    pub league: League,

    /// Last successful write
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    pub groups: Vec<StandingsGroup>,
}

impl TableSnapshot {
    pub fn from_table(table: &StandingsTable) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            league: table.league(),
            updated_at: Some(Utc::now()),
            groups: table.groups().to_vec(),
        }
    }

    /// Validate and rebuild the in-memory table.
    pub fn into_table(self, expected: League) -> Result<StandingsTable, SaveError> {
        match self.version {
            0 => log::info!(
                "Upgrading unversioned {} table snapshot to v{}",
                expected,
                SNAPSHOT_VERSION
            ),
            SNAPSHOT_VERSION => {}
            found => {
                return Err(SaveError::VersionMismatch {
                    found,
                    expected: SNAPSHOT_VERSION,
                });
            }
        }

        if self.league != expected {
            return Err(SaveError::LeagueMismatch {
                found: self.league,
                expected,
            });
        }

        Ok(StandingsTable::new(expected, self.groups)?)
    }
}

pub fn encode_table(table: &StandingsTable) -> Result<Vec<u8>, SaveError> {
    let mut bytes = serde_json::to_vec_pretty(&TableSnapshot::from_table(table))?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode_table(bytes: &[u8], league: League) -> Result<StandingsTable, SaveError> {
    let snapshot: TableSnapshot = serde_json::from_slice(bytes)?;
    snapshot.into_table(league)
}

pub fn encode_ledger(ledger: &Ledger) -> Result<Vec<u8>, SaveError> {
    let mut bytes = serde_json::to_vec_pretty(ledger)?;
    bytes.push(b'\n');
    Ok(bytes)
}

pub fn decode_ledger(bytes: &[u8]) -> Result<Ledger, SaveError> {
    Ok(serde_json::from_slice(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::baseline_table;
    use crate::models::MatchResult;

    #[test]
    fn test_table_survives_encoding() {
        let mut table = baseline_table(League::Nhl);
        table
            .apply(&MatchResult {
                match_id: "1".to_string(),
                league: League::Nhl,
                home_team_key: "BOS".to_string(),
                away_team_key: "TOR".to_string(),
                home_score: 4,
                away_score: 3,
                was_overtime_or_shootout: true,
            })
            .unwrap();
        table.sort();

        let decoded = decode_table(&encode_table(&table).unwrap(), League::Nhl).unwrap();

        assert_eq!(decoded.groups(), table.groups());
        assert_eq!(decoded.team("TOR").unwrap().ot_losses, 1);
    }

    #[test]
    fn test_unversioned_snapshot_is_upgraded() {
        let json = r#"{"league":"nba","groups":[{"name":"East","teams":[{"team_key":"BOS","name":"Boston","wins":3}]}]}"#;

        let table = decode_table(json.as_bytes(), League::Nba).unwrap();
        assert_eq!(table.team("BOS").unwrap().wins, 3);
    }

    #[test]
    fn test_future_version_is_rejected() {
        let json = r#"{"version":7,"league":"nba","groups":[]}"#;
        assert!(matches!(
            decode_table(json.as_bytes(), League::Nba),
            Err(SaveError::VersionMismatch {
                found: 7,
                expected: SNAPSHOT_VERSION
            })
        ));
    }

    #[test]
    fn test_wrong_league_is_rejected() {
        let bytes = encode_table(&baseline_table(League::Nfl)).unwrap();
        assert!(matches!(
            decode_table(&bytes, League::Nhl),
            Err(SaveError::LeagueMismatch {
                found: League::Nfl,
                expected: League::Nhl
            })
        ));
    }

    #[test]
    fn test_truncated_file_is_an_error() {
        let bytes = encode_table(&baseline_table(League::Nhl)).unwrap();
        assert!(matches!(
            decode_table(&bytes[..bytes.len() / 2], League::Nhl),
            Err(SaveError::Json(_))
        ));
    }

    #[test]
    fn test_duplicate_team_is_corrupt() {
        let json = r#"{"version":1,"league":"nhl","groups":[{"name":"A","teams":[{"team_key":"BOS"},{"team_key":"BOS"}]}]}"#;
        assert!(matches!(decode_table(json.as_bytes(), League::Nhl), Err(SaveError::Corrupted(_))));
    }
}
