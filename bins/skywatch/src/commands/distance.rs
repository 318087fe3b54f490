//! `skywatch distance`: distance between two points

use super::{print_json, OutputOptions};
use anyhow::Result;
use skywatch_geo::validation::ensure_coordinate;
use skywatch_geo::distance_km;

/// Run the distance command
pub fn run(lat1: f64, lon1: f64, lat2: f64, lon2: f64, opts: OutputOptions) -> Result<()> {
    // distance_km trusts its input, so reject NaN/inf here
    let lat1 = ensure_coordinate(Some(lat1), "lat1")?;
    let lon1 = ensure_coordinate(Some(lon1), "lon1")?;
    let lat2 = ensure_coordinate(Some(lat2), "lat2")?;
    let lon2 = ensure_coordinate(Some(lon2), "lon2")?;

    let distance = distance_km(lat1, lon1, lat2, lon2);
    tracing::debug!(lat1, lon1, lat2, lon2, distance, "Distance computed");

    if opts.json {
        return print_json(&serde_json::json!({ "distance_km": distance }));
    }

    println!("{}", opts.unit.format(Some(distance)));
    Ok(())
}
