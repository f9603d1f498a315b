//! Formatted standings
//!
//! Read-only projection of a league table for the rendering layer:
//! sections in table order, positions 1..N, derived columns computed
//! from the counters. Recomputed on every request, never persisted.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::league::League;
use crate::models::TeamRecord;
use crate::rules::{Columns, Ruleset};
use crate::table::StandingsTable;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedStandings {
    pub league: League,
    pub ruleset: Ruleset,
    pub sections: Vec<FormattedSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedSection {
    pub name: String,
    pub rows: Vec<StandingsRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// 1-based, within the section
    pub position: usize,
    pub team_key: String,
    pub name: String,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ot_losses: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ties: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub win_percentage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_back: Option<f64>,
    pub points_for: u32,
    pub points_against: u32,
    pub point_differential: i64,
}

impl FormattedStandings {
    /// Project `table` as it is ordered now. Callers sort first.
    pub fn from_table(table: &StandingsTable) -> Self {
        let ruleset = table.league().ruleset();
        let columns = ruleset.columns();

        let sections = table
            .groups()
            .iter()
            .map(|group| {
                let leader = group.teams.first();
                FormattedSection {
                    name: group.name.clone(),
                    rows: group
                        .teams
                        .iter()
                        .enumerate()
                        .map(|(idx, team)| project(idx + 1, team, leader, &columns))
                        .collect(),
                }
            })
            .collect();

        Self {
            league: table.league(),
            ruleset,
            sections,
        }
    }

    pub fn row(&self, team_key: &str) -> Option<&StandingsRow> {
        self.sections.iter().flat_map(|s| s.rows.iter()).find(|r| r.team_key == team_key)
    }

    pub fn section_of(&self, team_key: &str) -> Option<&FormattedSection> {
        self.sections.iter().find(|s| s.rows.iter().any(|r| r.team_key == team_key))
    }

    /// Fixed-width text table, one block per section.
    pub fn render_text(&self) -> String {
        let columns = self.ruleset.columns();
        let mut out = String::new();

        for (idx, section) in self.sections.iter().enumerate() {
            if idx > 0 {
                out.push('\n');
            }
            let _ = writeln!(out, "{} - {}", self.league.as_str().to_uppercase(), section.name);

            let mut header = format!("{:>3}  {:<5} {:>3} {:>3} {:>3}", "#", "TEAM", "GP", "W", "L");
            if columns.ot_losses {
                header.push_str("  OTL");
            }
            if columns.ties {
                header.push_str("   T");
            }
            if columns.points {
                header.push_str("  PTS");
            }
            if columns.win_percentage {
                header.push_str("   PCT");
            }
            if columns.games_back {
                header.push_str("    GB");
            }
            header.push_str("    PF    PA   DIFF");
            let _ = writeln!(out, "{}", header);

            for row in &section.rows {
                let _ = write!(
                    out,
                    "{:>3}  {:<5} {:>3} {:>3} {:>3}",
                    row.position, row.team_key, row.games_played, row.wins, row.losses
                );
                if let Some(otl) = row.ot_losses {
                    let _ = write!(out, " {:>4}", otl);
                }
                if let Some(ties) = row.ties {
                    let _ = write!(out, " {:>3}", ties);
                }
                if let Some(points) = row.points {
                    let _ = write!(out, " {:>4}", points);
                }
                if let Some(pct) = row.win_percentage {
                    let _ = write!(out, " {:>5}", format_percentage(pct));
                }
                if let Some(gb) = row.games_back {
                    let _ = write!(out, " {:>5}", format_games_back(gb));
                }
                let _ = writeln!(
                    out,
                    " {:>5} {:>5} {:>+6}",
                    row.points_for, row.points_against, row.point_differential
                );
            }
        }

        out
    }
}

fn project(
    position: usize,
    team: &TeamRecord,
    leader: Option<&TeamRecord>,
    columns: &Columns,
) -> StandingsRow {
    StandingsRow {
        position,
        team_key: team.team_key.clone(),
        name: team.name.clone(),
        games_played: team.games_played(),
        wins: team.wins,
        losses: team.losses,
        ot_losses: columns.ot_losses.then_some(team.ot_losses),
        ties: columns.ties.then_some(team.ties),
        points: columns.points.then(|| team.points()),
        win_percentage: columns.win_percentage.then(|| team.win_percentage()),
        games_back: if columns.games_back { leader.map(|l| games_back(l, team)) } else { None },
        points_for: team.points_for,
        points_against: team.points_against,
        point_differential: team.point_differential(),
    }
}

/// Half the sum of the win gap and the loss gap to the section leader.
fn games_back(leader: &TeamRecord, team: &TeamRecord) -> f64 {
    let win_gap = leader.wins as i64 - team.wins as i64;
    let loss_gap = team.losses as i64 - leader.losses as i64;
    (win_gap + loss_gap) as f64 / 2.0
}

/// `.625`, `1.000`
pub fn format_percentage(pct: f64) -> String {
    let text = format!("{:.3}", pct);
    match text.strip_prefix('0') {
        Some(rest) => rest.to_string(),
        None => text,
    }
}

/// `-` for the leader, otherwise one decimal
pub fn format_games_back(gb: f64) -> String {
    if gb == 0.0 {
        "-".to_string()
    } else {
        format!("{:.1}", gb)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::baseline::baseline_table;
    use crate::models::MatchResult;

    fn played(league: League, id: &str, home: &str, away: &str, hs: u32, aws: u32) -> MatchResult {
        MatchResult {
            match_id: id.to_string(),
            league,
            home_team_key: home.to_string(),
            away_team_key: away.to_string(),
            home_score: hs,
            away_score: aws,
            was_overtime_or_shootout: false,
        }
    }

    #[test]
    fn test_hockey_row_shape() {
        let mut table = baseline_table(League::Nhl);
        table.apply(&played(League::Nhl, "1", "BOS", "TOR", 3, 2)).unwrap();
        table.sort();

        let standings = FormattedStandings::from_table(&table);
        let row = standings.row("BOS").unwrap();

        insta::assert_json_snapshot!(row, @r###"
        {
          "position": 1,
          "team_key": "BOS",
          "name": "Boston Bruins",
          "games_played": 1,
          "wins": 1,
          "losses": 0,
          "ot_losses": 0,
          "points": 2,
          "points_for": 3,
          "points_against": 2,
          "point_differential": 1
        }
        "###);
    }

    #[test]
    fn test_positions_are_one_based_per_section() {
        let standings = FormattedStandings::from_table(&baseline_table(League::Nfl));

        assert_eq!(standings.sections.len(), 8);
        for section in &standings.sections {
            let positions: Vec<usize> = section.rows.iter().map(|r| r.position).collect();
            assert_eq!(positions, vec![1, 2, 3, 4]);
        }
    }

    #[test]
    fn test_basketball_games_back() {
        let mut table = baseline_table(League::Nba);
        table.apply(&played(League::Nba, "1", "BOS", "NY", 110, 100)).unwrap();
        table.apply(&played(League::Nba, "2", "BOS", "MIA", 101, 99)).unwrap();
        table.apply(&played(League::Nba, "3", "NY", "MIA", 95, 90)).unwrap();
        table.sort();

        let standings = FormattedStandings::from_table(&table);
        let east = standings.section_of("BOS").unwrap();

        assert_eq!(east.rows[0].team_key, "BOS");
        assert_eq!(east.rows[0].games_back, Some(0.0));
        assert_eq!(standings.row("NY").unwrap().games_back, Some(1.0));
        assert_eq!(standings.row("MIA").unwrap().games_back, Some(2.0));
        assert_eq!(standings.row("NY").unwrap().win_percentage, Some(0.5));
        assert_eq!(standings.row("NY").unwrap().points, None);
    }

    #[test]
    fn test_gridiron_columns() {
        let mut table = baseline_table(League::Nfl);
        table.apply(&played(League::Nfl, "1", "KC", "LV", 24, 24)).unwrap();
        table.sort();

        let standings = FormattedStandings::from_table(&table);
        let kc = standings.row("KC").unwrap();
        assert_eq!(kc.ties, Some(1));
        assert_eq!(kc.win_percentage, Some(0.5));
        assert_eq!(kc.games_back, None);
        assert_eq!(kc.ot_losses, None);
    }

    #[test]
    fn test_render_text() {
        let mut table = baseline_table(League::Nhl);
        table.apply(&played(League::Nhl, "1", "BOS", "TOR", 3, 2)).unwrap();
        table.sort();

        let text = FormattedStandings::from_table(&table).render_text();

        assert!(text.starts_with("NHL - Atlantic\n"));
        assert!(text.contains("PTS"));
        assert!(!text.contains("PCT"));
        let bos_line = text.lines().find(|l| l.contains("BOS")).unwrap();
        assert!(bos_line.trim_start().starts_with("1  BOS"));
        assert!(bos_line.trim_end().ends_with("+1"));
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_percentage(0.625), ".625");
        assert_eq!(format_percentage(1.0), "1.000");
        assert_eq!(format_percentage(0.0), ".000");
        assert_eq!(format_games_back(0.0), "-");
        assert_eq!(format_games_back(1.5), "1.5");
    }
}
