//! `skywatch groups`: closest aircraft per fleet

use super::{print_json, print_ranked, read_input, OutputOptions};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use skywatch_geo::{group_proximity, parse_groups, Coordinate, GroupResult};
use skywatch_telemetry::{counters, metrics, timed_span};
use std::path::Path;

/// Run the groups command
pub fn run(position: Coordinate, input: &Path, opts: OutputOptions) -> Result<()> {
    let groups = parse_groups(&read_input(input)?)
        .with_context(|| format!("Invalid group list in {}", input.display()))?;

    let results = {
        timed_span!("group_proximity", groups = groups.len());
        group_proximity(position.latitude, position.longitude, &groups)?
    };

    record(&results);

    if opts.json {
        return print_json(&results);
    }

    print_groups(&results, opts);
    Ok(())
}

fn record(results: &[GroupResult]) {
    let ranked: usize = results.iter().map(|g| g.members_ranked.len()).sum();
    metrics().increment_by(counters::GROUPS_PROCESSED, results.len() as u64);
    metrics().increment_by(counters::AIRCRAFT_RANKED, ranked as u64);
}

/// Prints each group with its closest aircraft highlighted
pub fn print_groups(results: &[GroupResult], opts: OutputOptions) {
    for group in results {
        let closest = group
            .closest_aircraft
            .as_ref()
            .map_or_else(|| "none".to_string(), |c| format!("{} at {}", c.callsign, opts.unit.format(Some(c.distance_km))));

        println!();
        println!("{} {}", group.group_name.bold(), format!("(closest: {closest})").dimmed());
        print_ranked(&group.members_ranked, opts.unit);
        if !group.missing.is_empty() {
            println!("  {}", format!("not found: {}", group.missing.join(", ")).yellow());
        }
    }
}
