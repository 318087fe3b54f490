//! skywatch: rank aircraft by great-circle distance from a reference point.

use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use skywatch_geo::DistanceUnit;
use std::path::PathBuf;
use std::process::ExitCode;

mod commands;
mod config;

use commands::{distance, groups, lookup, rank, resolve_position, OutputOptions};
use config::Config;

/// Aircraft proximity ranking
#[derive(Parser)]
#[command(name = "skywatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true, env = "SKYWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON
    #[arg(long, global = true)]
    json: bool,

    /// Display unit for distances (km, mi); defaults to the configured unit
    #[arg(long, global = true)]
    unit: Option<DistanceUnit>,

    /// Print collected counters and timings to stderr on exit
    #[arg(long, global = true)]
    stats: bool,

    #[command(subcommand)]
    command: Commands,
}

/// User position flags; the configured home position is used when both are absent
#[derive(clap::Args)]
struct PositionArgs {
    /// User latitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// User longitude in degrees
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Great-circle distance between two points
    Distance {
        #[arg(allow_negative_numbers = true)]
        lat1: f64,
        #[arg(allow_negative_numbers = true)]
        lon1: f64,
        #[arg(allow_negative_numbers = true)]
        lat2: f64,
        #[arg(allow_negative_numbers = true)]
        lon2: f64,
    },

    /// Rank aircraft (JSON array of records) by distance
    Rank {
        #[command(flatten)]
        position: PositionArgs,

        /// JSON file with aircraft records, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Closest aircraft per group (JSON array of groups)
    Groups {
        #[command(flatten)]
        position: PositionArgs,

        /// JSON file with groups, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,
    },

    /// Look up callsigns / ICAO24 addresses in a pool of positions
    Lookup {
        #[command(flatten)]
        position: PositionArgs,

        /// JSON file with aircraft positions, `-` for stdin
        #[arg(short, long, default_value = "-")]
        input: PathBuf,

        /// Callsign to report on (repeatable)
        #[arg(short, long = "callsign")]
        callsigns: Vec<String>,

        /// ICAO24 address to report on (repeatable)
        #[arg(long = "icao24")]
        icao24s: Vec<String>,

        /// JSON file with fleets: [{"name": ..., "callsigns": [...]}]
        #[arg(long)]
        fleets: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = run(&cli);

    if cli.stats {
        let stats = skywatch_telemetry::metrics().export_json();
        eprintln!("{}", serde_json::to_string_pretty(&stats).unwrap_or_default());
    }

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    skywatch_telemetry::init_with_config(config.schema.logging.telemetry(cli.verbose))?;
    if let Some(path) = &config.path {
        tracing::debug!(path = %path.display(), "Loaded config");
    }

    let opts = OutputOptions {
        json: cli.json,
        unit: cli.unit.unwrap_or(config.schema.display.unit),
    };

    match &cli.command {
        Commands::Distance { lat1, lon1, lat2, lon2 } => distance::run(*lat1, *lon1, *lat2, *lon2, opts),

        Commands::Rank { position, input } => {
            let position = resolve_position(position.lat, position.lon, config.home())?;
            rank::run(position, input, opts)
        }

        Commands::Groups { position, input } => {
            let position = resolve_position(position.lat, position.lon, config.home())?;
            groups::run(position, input, opts)
        }

        Commands::Lookup { position, input, callsigns, icao24s, fleets } => {
            let position = resolve_position(position.lat, position.lon, config.home())?;
            let args = lookup::LookupArgs {
                positions: input,
                callsigns,
                icao24s,
                fleets: fleets.as_deref(),
            };
            lookup::run(position, args, opts)
        }
    }
}
