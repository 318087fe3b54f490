//! Ranking of requested aircraft looked up by callsign or ICAO24 address.
//!
//! Upstream providers return a pool of positions for whatever was asked for.
//! This module matches the requested identifiers against that pool, ranks the
//! hits and reports which identifiers had no usable position.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::groups::GroupResult;
use crate::haversine::round_km;
use crate::ranking::{aircraft_position, by_distance, RankedAircraft};
use crate::record::AircraftRecord;
use crate::validation::ensure_user_position;
use crate::{haversine_distance, Coordinate, Result};

/// A ranked aircraft with its position echoed back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistanceResult {
    /// Upper-cased callsign
    pub callsign: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icao24: Option<String>,
    pub distance_km: f64,
    pub lat: f64,
    pub lon: f64,
    pub altitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl From<&DistanceResult> for RankedAircraft {
    fn from(result: &DistanceResult) -> Self {
        Self {
            callsign: result.callsign.clone(),
            distance_km: result.distance_km,
            altitude: result.altitude,
        }
    }
}

/// Outcome of looking up a list of identifiers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DistanceSummary {
    /// Sorted closest first
    pub results: Vec<DistanceResult>,
    /// Normalized identifiers that were not found or had no position
    pub missing: Vec<String>,
    pub closest: Option<DistanceResult>,
}

/// A fleet described by the callsigns of its members.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FleetSpec {
    pub name: String,
    #[serde(default)]
    pub callsigns: Vec<String>,
}

/// Trims and upper-cases callsigns, dropping blanks and repeats.
pub fn normalize_callsigns<S: AsRef<str>>(input: &[S]) -> Vec<String> {
    normalize_with(input, str::to_uppercase)
}

/// Trims and lower-cases ICAO24 addresses, dropping blanks and repeats.
pub fn normalize_icao24s<S: AsRef<str>>(input: &[S]) -> Vec<String> {
    normalize_with(input, str::to_lowercase)
}

fn normalize_with<S: AsRef<str>>(input: &[S], case: fn(&str) -> String) -> Vec<String> {
    let mut seen = HashSet::new();
    input
        .iter()
        .map(|item| item.as_ref().trim())
        .filter(|item| !item.is_empty())
        .map(case)
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

/// Positions indexed by upper-cased callsign and lower-cased ICAO24.
struct PositionIndex<'a> {
    by_key: HashMap<String, &'a AircraftRecord>,
}

impl<'a> PositionIndex<'a> {
    fn new(positions: &'a [AircraftRecord]) -> Self {
        let mut by_key = HashMap::with_capacity(positions.len() * 2);
        for record in positions {
            if let Some(callsign) = &record.callsign {
                by_key.insert(callsign.trim().to_uppercase(), record);
            }
            if let Some(icao24) = &record.icao24 {
                by_key.insert(icao24.trim().to_lowercase(), record);
            }
        }
        Self { by_key }
    }

    /// Callsign match first, then ICAO24.
    fn find(&self, identifier: &str) -> Option<&'a AircraftRecord> {
        let identifier = identifier.trim();
        self.by_key
            .get(&identifier.to_uppercase())
            .or_else(|| self.by_key.get(&identifier.to_lowercase()))
            .copied()
    }
}

/// Looks up each identifier in `positions` and ranks the matches.
///
/// # Arguments
/// * `user_lat`, `user_lon` - Reference position
/// * `positions` - Pool of known aircraft positions
/// * `identifiers` - Callsigns and/or ICAO24 addresses to report on
///
/// # Errors
/// Fails if the user position is missing or not finite.
///
/// # Example
/// ```
/// use skywatch_geo::{summarize_identifiers, AircraftRecord};
///
/// let positions = vec![AircraftRecord::new("AAA100", 52.52, 13.405)];
/// let summary = summarize_identifiers(50.1109, 8.6821, &positions, &["aaa100", "ZZZ999"]).unwrap();
///
/// assert_eq!(summary.closest.unwrap().callsign, "AAA100");
/// assert_eq!(summary.missing, vec!["ZZZ999"]);
/// ```
pub fn summarize_identifiers<S: AsRef<str>>(
    user_lat: impl Into<Option<f64>>,
    user_lon: impl Into<Option<f64>>,
    positions: &[AircraftRecord],
    identifiers: &[S],
) -> Result<DistanceSummary> {
    let user = ensure_user_position(user_lat.into(), user_lon.into())?;
    let index = PositionIndex::new(positions);
    Ok(summarize_from(&user, &index, identifiers))
}

/// Ranks each fleet's callsigns against the same pool of positions.
///
/// # Errors
/// Fails if the user position is missing or not finite.
pub fn fleet_proximity(
    user_lat: impl Into<Option<f64>>,
    user_lon: impl Into<Option<f64>>,
    positions: &[AircraftRecord],
    fleets: &[FleetSpec],
) -> Result<Vec<GroupResult>> {
    let user = ensure_user_position(user_lat.into(), user_lon.into())?;
    let index = PositionIndex::new(positions);

    Ok(fleets
        .iter()
        .map(|fleet| {
            let summary = summarize_from(&user, &index, &fleet.callsigns);
            let mut result = GroupResult::new(
                fleet.name.clone(),
                summary.results.iter().map(RankedAircraft::from).collect(),
            );
            result.missing = summary.missing;
            result
        })
        .collect())
}

fn summarize_from<S: AsRef<str>>(
    user: &Coordinate,
    index: &PositionIndex<'_>,
    identifiers: &[S],
) -> DistanceSummary {
    let mut summary = DistanceSummary::default();

    for identifier in identifiers {
        let identifier = identifier.as_ref();
        let normalized = identifier.trim().to_uppercase();

        let Some(record) = index.find(identifier) else {
            summary.missing.push(normalized);
            continue;
        };
        let Ok(position) = aircraft_position(record) else {
            debug!(identifier = %normalized, "Matched aircraft has no usable position");
            summary.missing.push(normalized);
            continue;
        };

        summary.results.push(DistanceResult {
            callsign: record.callsign().to_uppercase(),
            icao24: record.icao24.clone(),
            distance_km: round_km(haversine_distance(user, &position)),
            lat: position.latitude,
            lon: position.longitude,
            altitude: record.altitude(),
            last_update: record.last_update.clone(),
        });
    }

    summary
        .results
        .sort_by(|a, b| by_distance(a.distance_km, &a.callsign, b.distance_km, &b.callsign));
    summary.closest = summary.results.first().cloned();
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn positions() -> Vec<AircraftRecord> {
        serde_json::from_value(json!([
            {"callsign": "AAA100", "lat": 52.52, "lon": 13.405, "altitude_m": 11000,
             "last_update": "2026-02-19T09:40:00Z"},
            {"callsign": "BBB200", "icao24": "3c6444", "lat": 48.8566, "lon": 2.3522,
             "altitude_m": 10500},
            {"callsign": "CCC300", "lat": 41.9028, "lon": 12.4964, "altitude_m": 10200},
            {"callsign": "GROUND", "lat": null, "lon": 1.0}
        ]))
        .unwrap()
    }

    const FRANKFURT: (f64, f64) = (50.1109, 8.6821);

    #[test]
    fn test_selects_closest_and_sorts() {
        let summary =
            summarize_identifiers(FRANKFURT.0, FRANKFURT.1, &positions(), &["CCC300", "AAA100", "BBB200"])
                .unwrap();

        assert_eq!(summary.results.len(), 3);
        assert_eq!(summary.results[0].callsign, "AAA100");
        assert_eq!(summary.closest.as_ref().map(|c| c.callsign.as_str()), Some("AAA100"));
        assert_eq!(summary.results[0].altitude, Some(11000.0));
        assert_eq!(summary.results[0].last_update.as_deref(), Some("2026-02-19T09:40:00Z"));
        assert!(summary.missing.is_empty());
    }

    #[test]
    fn test_tracks_missing_identifiers() {
        let summary =
            summarize_identifiers(FRANKFURT.0, FRANKFURT.1, &positions(), &["AAA100", " zzz999 ", "ground"])
                .unwrap();

        assert_eq!(summary.results.len(), 1);
        assert_eq!(summary.missing, vec!["ZZZ999", "GROUND"]);
    }

    #[test]
    fn test_matches_icao24() {
        let summary = summarize_identifiers(FRANKFURT.0, FRANKFURT.1, &positions(), &["3C6444"]).unwrap();

        assert_eq!(summary.results[0].callsign, "BBB200");
        assert_eq!(summary.results[0].icao24.as_deref(), Some("3c6444"));
    }

    #[test]
    fn test_fleet_proximity() {
        let fleets = vec![
            FleetSpec { name: "Fleet A".into(), callsigns: vec!["AAA100".into(), "CCC300".into()] },
            FleetSpec { name: "Fleet B".into(), callsigns: vec!["BBB200".into(), "NOPE".into()] },
        ];

        let results = fleet_proximity(FRANKFURT.0, FRANKFURT.1, &positions(), &fleets).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].group_name, "Fleet A");
        assert_eq!(results[0].closest_aircraft.as_ref().unwrap().callsign, "AAA100");
        assert_eq!(results[1].members_ranked[0].callsign, "BBB200");
        assert_eq!(results[1].missing, vec!["NOPE"]);
    }

    #[test]
    fn test_normalizers() {
        assert_eq!(
            normalize_callsigns(&[" aaa100", "AAA100", "", "  ", "bbb200 "]),
            vec!["AAA100", "BBB200"]
        );
        assert_eq!(normalize_icao24s(&["3C6444", "3c6444 ", "ABC123"]), vec!["3c6444", "abc123"]);
    }

    #[test]
    fn test_invalid_user_position() {
        let empty: [&str; 0] = [];
        assert!(summarize_identifiers(None::<f64>, 0.0, &positions(), &empty).is_err());
    }
}
