//! `skywatch rank`: rank a list of aircraft by distance

use super::{print_json, print_ranked, read_input, OutputOptions};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use skywatch_geo::{parse_aircraft, rank_with_report, Coordinate};
use skywatch_telemetry::{counters, metrics, timed_span};
use std::path::Path;

/// Run the rank command
pub fn run(position: Coordinate, input: &Path, opts: OutputOptions) -> Result<()> {
    let aircraft = parse_aircraft(&read_input(input)?)
        .with_context(|| format!("Invalid aircraft list in {}", input.display()))?;

    let report = {
        timed_span!("rank", count = aircraft.len());
        rank_with_report(position.latitude, position.longitude, &aircraft)?
    };

    metrics().increment_by(counters::AIRCRAFT_RANKED, report.ranked.len() as u64);
    metrics().increment_by(counters::AIRCRAFT_SKIPPED, report.skipped.len() as u64);

    if opts.json {
        return print_json(&report);
    }

    print_ranked(&report.ranked, opts.unit);
    if !report.skipped.is_empty() {
        let names: Vec<&str> = report.skipped.iter().map(|s| s.callsign.as_str()).collect();
        println!(
            "  {}",
            format!("skipped {} without a usable position: {}", names.len(), names.join(", ")).yellow()
        );
    }
    Ok(())
}
