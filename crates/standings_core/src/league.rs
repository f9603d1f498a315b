//! Supported leagues and their ruleset mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StandingsError;
use crate::rules::Ruleset;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum League {
    Nhl,
    Nba,
    Nfl,
}

impl League {
    pub const ALL: [League; 3] = [League::Nhl, League::Nba, League::Nfl];

    pub fn as_str(&self) -> &'static str {
        match self {
            League::Nhl => "nhl",
            League::Nba => "nba",
            League::Nfl => "nfl",
        }
    }

    pub fn ruleset(&self) -> Ruleset {
        match self {
            League::Nhl => Ruleset::TwoPoints,
            League::Nba => Ruleset::WinLoss,
            League::Nfl => Ruleset::WinLossTie,
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            League::Nhl => 0,
            League::Nba => 1,
            League::Nfl => 2,
        }
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for League {
    type Err = StandingsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nhl" | "hockey" => Ok(League::Nhl),
            "nba" | "basketball" => Ok(League::Nba),
            "nfl" | "football" => Ok(League::Nfl),
            other => Err(StandingsError::UnknownLeague(other.to_string())),
        }
    }
}
