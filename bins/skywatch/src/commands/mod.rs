//! Command implementations

pub mod distance;
pub mod groups;
pub mod lookup;
pub mod rank;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use skywatch_geo::validation::{ensure_in_range, ensure_user_position};
use skywatch_geo::{Coordinate, DistanceUnit, RankedAircraft};
use std::io::Read;
use std::path::Path;

/// Settings shared by every command
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    pub json: bool,
    pub unit: DistanceUnit,
}

/// Resolves the user position from flags, falling back to the configured home.
///
/// The position must be finite and within the valid degree ranges.
pub fn resolve_position(
    lat: Option<f64>,
    lon: Option<f64>,
    home: (Option<f64>, Option<f64>),
) -> Result<Coordinate> {
    let (lat, lon) = match (lat, lon) {
        (None, None) => home,
        given => given,
    };
    let position = ensure_user_position(lat, lon)?;
    Ok(ensure_in_range(position)?)
}

/// Reads a whole input file, `-` meaning stdin.
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read input from stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Prints ranked aircraft as an aligned table.
pub fn print_ranked(ranked: &[RankedAircraft], unit: DistanceUnit) {
    if ranked.is_empty() {
        println!("  {}", "no aircraft with a usable position".dimmed());
        return;
    }
    for (i, aircraft) in ranked.iter().enumerate() {
        let altitude = aircraft
            .altitude
            .map_or_else(|| "—".to_string(), |alt| format!("{alt:.0} m"));
        let line = format!(
            "{:>3}. {:<10} {:>14} {:>10}",
            i + 1,
            aircraft.callsign,
            unit.format(Some(aircraft.distance_km)),
            altitude
        );
        if i == 0 {
            println!("{}", line.green());
        } else {
            println!("{line}");
        }
    }
}
