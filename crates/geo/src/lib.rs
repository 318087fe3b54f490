//! Aircraft proximity calculations for skywatch.
//!
//! This crate provides:
//! - Haversine distance calculations
//! - Coordinate validation at request boundaries
//! - Proximity ranking of aircraft around a user position
//! - Per-fleet aggregation, optionally in parallel
//! - Lookup of requested callsigns / ICAO24 addresses in a position pool
//!
//! # Example
//!
//! ```
//! use skywatch_geo::{distance_km, rank_by_proximity, AircraftRecord};
//!
//! // London to Paris
//! let d = distance_km(51.5074, -0.1278, 48.8566, 2.3522);
//! assert!((d - 343.56).abs() < 1.0);
//!
//! let aircraft = vec![
//!     AircraftRecord::new("BAW1", 51.47, -0.45),
//!     AircraftRecord::new("AFR2", 49.00, 2.55),
//! ];
//! let ranked = rank_by_proximity(51.5074, -0.1278, &aircraft).unwrap();
//! assert_eq!(ranked[0].callsign, "BAW1");
//! ```

mod error;
mod haversine;
pub mod groups;
pub mod lookup;
pub mod ranking;
pub mod record;
pub mod units;
pub mod validation;

pub use error::{GeoError, GeoErrorCode, Result};
pub use groups::{group_proximity, GroupResult};
pub use haversine::{distance_km, haversine_distance, EARTH_RADIUS_KM};
pub use lookup::{
    fleet_proximity, normalize_callsigns, normalize_icao24s, summarize_identifiers, DistanceResult,
    DistanceSummary, FleetSpec,
};
pub use ranking::{rank_by_proximity, rank_with_report, RankReport, RankedAircraft, SkipReason, SkippedAircraft};
pub use record::{AircraftRecord, Group};
pub use units::DistanceUnit;

/// A geographic coordinate with latitude and longitude.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Coordinate {
    /// Latitude in degrees (-90 to 90)
    pub latitude: f64,
    /// Longitude in degrees (-180 to 180)
    pub longitude: f64,
}

impl Coordinate {
    /// Creates a new coordinate.
    ///
    /// # Arguments
    /// * `latitude` - Latitude in degrees (-90 to 90)
    /// * `longitude` - Longitude in degrees (-180 to 180)
    #[inline]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Returns true if the coordinate lies within the valid degree ranges.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude >= -90.0
            && self.latitude <= 90.0
            && self.longitude >= -180.0
            && self.longitude <= 180.0
    }

    /// Converts degrees to radians for internal calculations.
    #[inline]
    pub(crate) fn to_radians(&self) -> (f64, f64) {
        (self.latitude.to_radians(), self.longitude.to_radians())
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self::new(lat, lon)
    }
}

/// Parses a JSON array of aircraft records.
pub fn parse_aircraft(json: &str) -> Result<Vec<AircraftRecord>> {
    Ok(serde_json::from_str(json)?)
}

/// Parses a JSON array of groups.
pub fn parse_groups(json: &str) -> Result<Vec<Group>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_creation() {
        let coord = Coordinate::new(52.5200, 13.4050);
        assert_eq!(coord.latitude, 52.5200);
        assert_eq!(coord.longitude, 13.4050);
    }

    #[test]
    fn test_coordinate_validation() {
        assert!(Coordinate::new(0.0, 0.0).is_valid());
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
        assert!(!Coordinate::new(91.0, 0.0).is_valid());
        assert!(!Coordinate::new(0.0, 181.0).is_valid());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_valid());
    }

    #[test]
    fn test_coordinate_from_tuple() {
        let coord: Coordinate = (52.5200, 13.4050).into();
        assert_eq!(coord.latitude, 52.5200);
    }

    #[test]
    fn test_parse_aircraft() {
        let aircraft = parse_aircraft(r#"[{"callsign": "A", "lat": 1, "lon": 2}]"#).unwrap();
        assert_eq!(aircraft[0].lon, Some(2.0));

        let err = parse_aircraft("{not json").unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::JsonParsing);
    }

    #[test]
    fn test_parse_groups() {
        let groups = parse_groups(r#"[{"group_name": "G", "aircraft_list": []}]"#).unwrap();
        assert_eq!(groups[0].resolved_name(), "G");
    }

    #[test]
    fn test_mistyped_identifier_does_not_reject_batch() {
        let aircraft = parse_aircraft(
            r#"[{"callsign": 123, "lat": 1, "lon": 1}, {"callsign": "OK", "lat": 2, "lon": 2}]"#,
        )
        .unwrap();
        let ranked = crate::rank_by_proximity(0.0, 0.0, &aircraft).unwrap();
        let callsigns: Vec<&str> = ranked.iter().map(|r| r.callsign.as_str()).collect();
        assert_eq!(callsigns, ["123", "OK"]);

        let groups = parse_groups(
            r#"[{"name": "G", "aircraft": [{"callsign": "A", "icao24": 4242, "lat": 1, "lon": 1}]}]"#,
        )
        .unwrap();
        assert_eq!(groups[0].resolved_aircraft()[0].icao24.as_deref(), Some("4242"));
    }
}
