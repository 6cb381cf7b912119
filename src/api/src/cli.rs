//! CLI commands for f1-api.
//!
//! Supports API server mode and one-shot dataset queries.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::dataset::{self, load_tables, FastestLapResult, RaceEntrants, SeasonSchedule, TableStore};

#[derive(Parser)]
#[command(name = "f1-api")]
#[command(version, about = "F1 race data API and CLI over the historical dataset", long_about = None)]
pub struct Cli {
    /// Config file (defaults to config.* in the working directory)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to (overrides config)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Fastest lap of a race
    FastestLap {
        year: i32,
        round: i32,
        #[command(flatten)]
        output: QueryArgs,
    },

    /// Race schedule of a season
    Schedule {
        year: i32,
        #[command(flatten)]
        output: QueryArgs,
    },

    /// Drivers with lap data in a race
    Entrants {
        year: i32,
        round: i32,
        #[command(flatten)]
        output: QueryArgs,
    },
}

/// Options shared by the query commands.
#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
    /// Dataset directory override
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Output format (json, table)
    #[arg(short, long, default_value = "table")]
    pub format: String,
}

/// Load configuration and the dataset tables for a one-shot query.
fn load_store(config_file: Option<&Path>, data_dir: Option<PathBuf>) -> anyhow::Result<TableStore> {
    let mut config = AppConfig::load_from(config_file)?;
    if let Some(dir) = data_dir {
        config.dataset.dir = dir.to_string_lossy().to_string();
    }

    let sources = config.dataset.sources();
    tracing::info!("Loading dataset from: {}", config.dataset.dir);
    let store = load_tables(&sources).context("Failed to load dataset tables")?;
    Ok(store)
}

/// Print `value` as JSON or through the table printer.
fn emit<T: Serialize>(format: &str, value: &T, print_table: fn(&T)) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(value)?),
        "table" => print_table(value),
        _ => {
            tracing::warn!("Unknown format: {}. Using JSON.", format);
            println!("{}", serde_json::to_string_pretty(value)?);
        }
    }
    Ok(())
}

/// Run the fastest-lap query.
pub fn run_fastest_lap(
    config_file: Option<&Path>,
    year: i32,
    round: i32,
    output: QueryArgs,
) -> anyhow::Result<()> {
    let store = load_store(config_file, output.data_dir)?;
    let result = dataset::fastest_lap(&store, year, round)?;
    emit(&output.format, &result, print_fastest_lap)
}

/// Run the season schedule query.
pub fn run_schedule(config_file: Option<&Path>, year: i32, output: QueryArgs) -> anyhow::Result<()> {
    let store = load_store(config_file, output.data_dir)?;
    let schedule = dataset::schedule(&store, year)?;
    emit(&output.format, &schedule, print_schedule)
}

/// Run the entrants query.
pub fn run_entrants(
    config_file: Option<&Path>,
    year: i32,
    round: i32,
    output: QueryArgs,
) -> anyhow::Result<()> {
    let store = load_store(config_file, output.data_dir)?;
    let field = dataset::entrants(&store, year, round)?;
    emit(&output.format, &field, print_entrants)
}

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

fn print_fastest_lap(result: &FastestLapResult) {
    println!(
        "{} Round {}: {} (raceId {})",
        result.year, result.round, result.race_name, result.race_id
    );
    println!();
    println!("=== Fastest Lap ===");
    println!(
        "  Driver: {} (#{}, {})",
        result.driver.full_name,
        or_dash(result.driver.number.as_deref()),
        or_dash(result.driver.code.as_deref())
    );
    println!("  Time:   {} ({} ms)", result.lap.time_display, result.lap.time_ms);
    println!("  Lap:    {}", result.lap.lap_number);
}

fn print_schedule(schedule: &SeasonSchedule) {
    println!("=== {} Season ===", schedule.year);
    for race in &schedule.races {
        let date = race
            .date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "----------".to_string());
        println!("  {:2}. {}  {}", race.round, date, race.name);
    }
}

fn print_entrants(field: &RaceEntrants) {
    println!(
        "{} Round {}: {} (raceId {})",
        field.year, field.round, field.race_name, field.race_id
    );
    println!();
    println!("=== Entrants ===");
    for (i, e) in field.entrants.iter().enumerate() {
        println!(
            "  {:2}. {:<28} {:>4} {:>3}  laps {:>3}  best {} (lap {})",
            i + 1,
            e.driver.full_name,
            or_dash(e.driver.code.as_deref()),
            or_dash(e.driver.number.as_deref()),
            e.laps_completed,
            e.best_lap.time_display,
            e.best_lap.lap_number
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::test_util::write_dataset;
    use tempfile::TempDir;

    #[test]
    fn test_parse_fastest_lap_command() {
        let cli = Cli::parse_from([
            "f1-api",
            "fastest-lap",
            "2021",
            "5",
            "--format",
            "json",
            "--data-dir",
            "/srv/f1",
        ]);

        match cli.command {
            Commands::FastestLap {
                year,
                round,
                output,
            } => {
                assert_eq!((year, round), (2021, 5));
                assert_eq!(output.format, "json");
                assert_eq!(output.data_dir, Some(PathBuf::from("/srv/f1")));
            }
            _ => panic!("expected fastest-lap"),
        }
    }

    #[test]
    fn test_parse_serve_without_overrides() {
        let cli = Cli::parse_from(["f1-api", "--config", "f1.toml", "serve"]);
        assert_eq!(cli.config, Some(PathBuf::from("f1.toml")));
        assert!(matches!(
            cli.command,
            Commands::Serve {
                host: None,
                port: None
            }
        ));
    }

    #[test]
    fn test_run_queries_against_data_dir() {
        let dir = TempDir::new().unwrap();
        write_dataset(&dir);
        let output = QueryArgs {
            data_dir: Some(dir.path().to_path_buf()),
            format: "json".to_string(),
        };

        run_fastest_lap(None, 2021, 5, output.clone()).unwrap();
        run_schedule(None, 2021, output.clone()).unwrap();
        run_entrants(None, 2021, 6, output.clone()).unwrap();

        let err = run_fastest_lap(None, 1950, 1, output).unwrap_err();
        let classified = err.downcast_ref::<crate::dataset::DatasetError>().unwrap();
        assert_eq!(classified.kind(), "no_lap_data");
    }

    #[test]
    fn test_missing_data_dir_fails_before_query() {
        let dir = TempDir::new().unwrap();
        let output = QueryArgs {
            data_dir: Some(dir.path().join("absent")),
            format: "table".to_string(),
        };

        let err = run_fastest_lap(None, 2021, 5, output).unwrap_err();
        assert!(err.to_string().contains("Failed to load dataset tables"));
    }
}
