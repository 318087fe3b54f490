//! `skywatch lookup`: report on requested callsigns / ICAO24 addresses

use super::groups::print_groups;
use super::{print_json, print_ranked, read_input, OutputOptions};
use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use serde::Serialize;
use skywatch_geo::{
    fleet_proximity, normalize_callsigns, normalize_icao24s, parse_aircraft, summarize_identifiers, Coordinate,
    DistanceResult, FleetSpec, GroupResult, RankedAircraft,
};
use skywatch_telemetry::{counters, metrics, timed_span};
use std::path::Path;

/// Arguments of the lookup command
#[derive(Debug)]
pub struct LookupArgs<'a> {
    pub positions: &'a Path,
    pub callsigns: &'a [String],
    pub icao24s: &'a [String],
    pub fleets: Option<&'a Path>,
}

#[derive(Debug, Serialize)]
struct LookupOutput {
    results: Vec<DistanceResult>,
    closest: Option<DistanceResult>,
    missing: Vec<String>,
    groups: Vec<GroupResult>,
}

/// Run the lookup command
pub fn run(position: Coordinate, args: LookupArgs<'_>, opts: OutputOptions) -> Result<()> {
    let positions = parse_aircraft(&read_input(args.positions)?)
        .with_context(|| format!("Invalid position list in {}", args.positions.display()))?;

    let fleets: Vec<FleetSpec> = match args.fleets {
        Some(path) => serde_json::from_str(&read_input(path)?)
            .with_context(|| format!("Invalid fleet list in {}", path.display()))?,
        None => Vec::new(),
    };
    let fleets: Vec<FleetSpec> = fleets
        .into_iter()
        .map(|fleet| FleetSpec {
            callsigns: normalize_callsigns(&fleet.callsigns),
            ..fleet
        })
        .collect();

    let identifiers: Vec<String> = normalize_callsigns(args.callsigns)
        .into_iter()
        .chain(normalize_icao24s(args.icao24s))
        .collect();

    let (summary, groups) = {
        timed_span!("lookup", identifiers = identifiers.len(), fleets = fleets.len());
        let summary = summarize_identifiers(position.latitude, position.longitude, &positions, &identifiers)?;
        let groups = fleet_proximity(position.latitude, position.longitude, &positions, &fleets)?;
        (summary, groups)
    };

    let missing = summary.missing.len() + groups.iter().map(|g| g.missing.len()).sum::<usize>();
    metrics().increment_by(counters::IDENTIFIERS_MISSING, missing as u64);
    metrics().increment_by(counters::AIRCRAFT_RANKED, summary.results.len() as u64);
    metrics().increment_by(counters::GROUPS_PROCESSED, groups.len() as u64);

    if opts.json {
        return print_json(&LookupOutput {
            results: summary.results,
            closest: summary.closest,
            missing: summary.missing,
            groups,
        });
    }

    let ranked: Vec<RankedAircraft> = summary.results.iter().map(RankedAircraft::from).collect();
    print_ranked(&ranked, opts.unit);
    if !summary.missing.is_empty() {
        println!("  {}", format!("not found: {}", summary.missing.join(", ")).yellow());
    }
    print_groups(&groups, opts);
    Ok(())
}
