//! Standings CLI
//!
//! Runs one update cycle from a saved scoreboard payload, prints the
//! current standings, or resets a league to season start.
//!
//! Logs go to stderr; filter with `RUST_LOG` (default: info).

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use standings_core::{
    CycleReport, CycleWarning, EngineConfig, FormattedStandings, League, StandingsEngine,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "standings")]
#[command(about = "Deduplicated league standings from scoreboard polls", long_about = None)]
#[command(version = standings_core::VERSION)]
struct Cli {
    /// Snapshot directory (overrides STANDINGS_DATA_DIR)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a scoreboard payload and print the resulting standings
    Update {
        /// League id: nhl, nba or nfl
        #[arg(long)]
        league: League,

        /// Payload file, or "-" for stdin (the default)
        #[arg(long, default_value = "-")]
        payload: PathBuf,

        /// Print the cycle report as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Print current standings without applying anything
    Show {
        /// League id; all leagues when omitted
        #[arg(long)]
        league: Option<League>,

        /// Print as JSON
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// Delete the league's snapshot and start over from the baseline table
    Reset {
        #[arg(long)]
        league: League,
    },
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let config = match cli.data_dir {
        Some(dir) => EngineConfig::new(dir),
        None => EngineConfig::from_env(),
    };
    tracing::debug!(data_dir = %config.data_dir.display(), "Using snapshot directory");
    let engine = StandingsEngine::new(config);

    match cli.command {
        Commands::Update { league, payload, json } => {
            let raw = read_payload(&payload)?;
            let report = engine.update(league, &raw);

            if json {
                println!("{}", report_json(&report)?);
            } else {
                print!("{}", report.standings.render_text());
                print_summary(&report);
            }
        }

        Commands::Show { league, json } => {
            let leagues = match league {
                Some(league) => vec![league],
                None => League::ALL.to_vec(),
            };
            let all: Vec<FormattedStandings> =
                leagues.into_iter().map(|l| engine.standings(l)).collect();

            if json {
                println!("{}", serde_json::to_string_pretty(&all)?);
            } else {
                for standings in &all {
                    print!("{}", standings.render_text());
                    println!();
                }
            }
        }

        Commands::Reset { league } => {
            engine
                .reset(league)
                .with_context(|| format!("Failed to reset {} standings", league))?;
            println!("{} standings reset to season start", league);
        }
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn read_payload(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut raw = String::new();
        std::io::stdin()
            .read_to_string(&mut raw)
            .context("Failed to read payload from stdin")?;
        return Ok(raw);
    }

    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read payload {}", path.display()))
}

fn print_summary(report: &CycleReport) {
    println!();
    if report.applied.is_empty() {
        println!("No new results");
    } else {
        println!("Applied {} new result(s): {}", report.applied.len(), report.applied.join(", "));
    }
    if !report.persisted && report.changed() {
        println!("Snapshot not written; will retry on next update");
    }
    for warning in &report.warnings {
        println!("warning: {}", describe(warning));
    }
}

fn describe(warning: &CycleWarning) -> String {
    match warning {
        CycleWarning::MalformedPayload(e) => format!("payload ignored ({e})"),
        CycleWarning::UnknownTeam { match_id, team_key } => {
            format!("match {match_id} skipped, unknown team {team_key}")
        }
        CycleWarning::LevelScore { match_id } => {
            format!("match {match_id} finished level, credited to the away side")
        }
        CycleWarning::PersistFailed(e) => format!("snapshot write failed ({e})"),
        CycleWarning::SnapshotDiscarded(e) => format!("stored snapshot discarded ({e})"),
        CycleWarning::LedgerMissing => {
            "ledger file missing, current scoreboard may be counted twice".to_string()
        }
        CycleWarning::SnapshotUnavailable(e) => {
            format!("snapshot unreadable, nothing applied ({e})")
        }
    }
}

fn report_json(report: &CycleReport) -> Result<String> {
    let warnings: Vec<String> = report.warnings.iter().map(describe).collect();
    let value = serde_json::json!({
        "league": report.league,
        "applied": report.applied,
        "persisted": report.persisted,
        "warnings": warnings,
        "standings": report.standings,
    });
    Ok(serde_json::to_string_pretty(&value)?)
}
