//! Proximity ranking of aircraft around a user position.
//!
//! The user position is validated once per call. Aircraft with missing or
//! non-finite coordinates are skipped rather than failing the batch, so one
//! bad telemetry point does not abort the whole list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::haversine::round_km;
use crate::record::AircraftRecord;
use crate::validation::ensure_user_position;
use crate::{haversine_distance, Coordinate, Result};

/// Distance from the user to a single aircraft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedAircraft {
    pub callsign: String,
    /// Great-circle distance in kilometers, two decimal places
    pub distance_km: f64,
    /// `altitude`, falling back to `altitude_m`
    pub altitude: Option<f64>,
}

/// Why an aircraft was left out of a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Latitude or longitude absent
    MissingCoordinates,
    /// Latitude or longitude NaN or infinite
    InvalidCoordinates,
}

/// An aircraft excluded from a ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedAircraft {
    pub callsign: String,
    pub reason: SkipReason,
}

/// A ranking together with the aircraft it had to skip.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankReport {
    /// Sorted closest first
    pub ranked: Vec<RankedAircraft>,
    pub skipped: Vec<SkippedAircraft>,
}

impl RankReport {
    /// The nearest aircraft, if any could be ranked.
    pub fn closest(&self) -> Option<&RankedAircraft> {
        self.ranked.first()
    }
}

/// Ranks aircraft by distance from the user, closest first.
///
/// # Arguments
/// * `user_lat` - User's latitude (`f64` or `Option<f64>`)
/// * `user_lon` - User's longitude (`f64` or `Option<f64>`)
/// * `aircraft` - Position reports to rank
///
/// # Errors
/// Fails with `MissingCoordinate` / `InvalidCoordinate` if the user position
/// is unusable. Bad aircraft records never produce an error.
///
/// # Example
/// ```
/// use skywatch_geo::{rank_by_proximity, AircraftRecord};
///
/// let aircraft = vec![
///     AircraftRecord::new("FAR", 10.0, 10.0),
///     AircraftRecord::new("NEAR", 1.0, 1.0),
/// ];
///
/// let ranked = rank_by_proximity(0.0, 0.0, &aircraft).unwrap();
/// assert_eq!(ranked[0].callsign, "NEAR");
/// ```
pub fn rank_by_proximity(
    user_lat: impl Into<Option<f64>>,
    user_lon: impl Into<Option<f64>>,
    aircraft: &[AircraftRecord],
) -> Result<Vec<RankedAircraft>> {
    rank_with_report(user_lat, user_lon, aircraft).map(|report| report.ranked)
}

/// Same as [`rank_by_proximity`], also returning the skipped aircraft.
pub fn rank_with_report(
    user_lat: impl Into<Option<f64>>,
    user_lon: impl Into<Option<f64>>,
    aircraft: &[AircraftRecord],
) -> Result<RankReport> {
    let user = ensure_user_position(user_lat.into(), user_lon.into())?;
    Ok(rank_from(&user, aircraft))
}

/// Ranks against an already validated user position.
pub(crate) fn rank_from(user: &Coordinate, aircraft: &[AircraftRecord]) -> RankReport {
    let mut report = RankReport::default();

    for record in aircraft {
        let callsign = record.callsign();

        let position = match aircraft_position(record) {
            Ok(position) => position,
            Err(reason) => {
                info!(callsign, ?reason, "Skipping aircraft");
                report.skipped.push(SkippedAircraft {
                    callsign: callsign.to_string(),
                    reason,
                });
                continue;
            }
        };

        let distance_km = round_km(haversine_distance(user, &position));
        debug!(callsign, distance_km, "Distance computed");

        report.ranked.push(RankedAircraft {
            callsign: callsign.to_string(),
            distance_km,
            altitude: record.altitude(),
        });
    }

    report.ranked.sort_by(|a, b| by_distance(a.distance_km, &a.callsign, b.distance_km, &b.callsign));
    report
}

/// Position of an aircraft, or why it cannot be ranked.
pub(crate) fn aircraft_position(record: &AircraftRecord) -> std::result::Result<Coordinate, SkipReason> {
    let (Some(lat), Some(lon)) = (record.lat, record.lon) else {
        return Err(SkipReason::MissingCoordinates);
    };
    if !lat.is_finite() || !lon.is_finite() {
        return Err(SkipReason::InvalidCoordinates);
    }
    Ok(Coordinate::new(lat, lon))
}

/// Ascending distance; equal distances ordered by callsign.
pub(crate) fn by_distance(a_km: f64, a_callsign: &str, b_km: f64, b_callsign: &str) -> Ordering {
    a_km.total_cmp(&b_km).then_with(|| a_callsign.cmp(b_callsign))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GeoError, GeoErrorCode};
    use proptest::prelude::*;
    use serde_json::json;

    fn records(value: serde_json::Value) -> Vec<AircraftRecord> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_skip_policy() {
        let aircraft = records(json!([
            {"lat": 1, "lon": 1, "callsign": "A"},
            {"lat": null, "lon": 2, "callsign": "B"},
            {"lat": 3, "lon": 3, "callsign": "C"}
        ]));

        let ranked = rank_by_proximity(0.0, 0.0, &aircraft).unwrap();

        let callsigns: Vec<_> = ranked.iter().map(|r| r.callsign.as_str()).collect();
        assert_eq!(callsigns, ["A", "C"]);
        assert!(ranked[0].distance_km < ranked[1].distance_km);
    }

    #[test]
    fn test_report_lists_skipped() {
        let mut aircraft = records(json!([
            {"callsign": "NOPOS"},
            {"callsign": "OK", "lat": 1.0, "lon": 1.0}
        ]));
        aircraft.push(AircraftRecord::new("NAN", f64::NAN, 0.0));

        let report = rank_with_report(0.0, 0.0, &aircraft).unwrap();

        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.closest().map(|r| r.callsign.as_str()), Some("OK"));
        assert_eq!(
            report.skipped,
            vec![
                SkippedAircraft { callsign: "NOPOS".into(), reason: SkipReason::MissingCoordinates },
                SkippedAircraft { callsign: "NAN".into(), reason: SkipReason::InvalidCoordinates },
            ]
        );
    }

    #[test]
    fn test_frankfurt_ordering() {
        let aircraft = vec![
            AircraftRecord::new("CCC300", 41.9028, 12.4964),
            AircraftRecord::new("AAA100", 52.52, 13.405),
            AircraftRecord::new("BBB200", 48.8566, 2.3522),
        ];

        let ranked = rank_by_proximity(50.1109, 8.6821, &aircraft).unwrap();

        let callsigns: Vec<_> = ranked.iter().map(|r| r.callsign.as_str()).collect();
        assert_eq!(callsigns, ["AAA100", "BBB200", "CCC300"]);
    }

    #[test]
    fn test_altitude_fallback() {
        let aircraft = records(json!([{"callsign": "ALT", "lat": 1, "lon": 1, "altitude_m": 10500}]));
        let ranked = rank_by_proximity(0.0, 0.0, &aircraft).unwrap();
        assert_eq!(ranked[0].altitude, Some(10500.0));

        let aircraft = records(json!([{"lat": 1, "lon": 1}]));
        let ranked = rank_by_proximity(0.0, 0.0, &aircraft).unwrap();
        assert_eq!(ranked[0].callsign, "unknown");
        assert_eq!(ranked[0].altitude, None);
    }

    #[test]
    fn test_ties_ordered_by_callsign() {
        let aircraft = vec![
            AircraftRecord::new("ZULU", 0.0, 1.0),
            AircraftRecord::new("ALPHA", 0.0, -1.0),
            AircraftRecord::new("MIKE", 1.0, 0.0),
        ];

        let ranked = rank_by_proximity(0.0, 0.0, &aircraft).unwrap();

        let callsigns: Vec<_> = ranked.iter().map(|r| r.callsign.as_str()).collect();
        assert_eq!(callsigns, ["ALPHA", "MIKE", "ZULU"]);
    }

    #[test]
    fn test_empty_list() {
        assert!(rank_by_proximity(0.0, 0.0, &[]).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_user_position_fails() {
        let aircraft = vec![AircraftRecord::new("A", 1.0, 1.0)];

        let err = rank_by_proximity(None::<f64>, 0.0, &aircraft).unwrap_err();
        assert!(matches!(err, GeoError::MissingCoordinate { ref field } if field == "user_lat"));

        let err = rank_by_proximity(0.0, f64::INFINITY, &aircraft).unwrap_err();
        assert_eq!(err.code(), GeoErrorCode::InvalidCoordinate);
        assert_eq!(err.field(), Some("user_lon"));
    }

    fn arb_record() -> impl Strategy<Value = AircraftRecord> {
        (
            "[A-Z]{3}[0-9]{3}",
            proptest::option::weighted(0.9, -90.0f64..=90.0),
            proptest::option::weighted(0.9, -180.0f64..=180.0),
        )
            .prop_map(|(callsign, lat, lon)| AircraftRecord {
                callsign: Some(callsign),
                lat,
                lon,
                ..AircraftRecord::default()
            })
    }

    proptest! {
        #[test]
        fn prop_sorted_non_decreasing(
            user_lat in -90.0f64..=90.0,
            user_lon in -180.0f64..=180.0,
            aircraft in proptest::collection::vec(arb_record(), 0..40),
        ) {
            let report = rank_with_report(user_lat, user_lon, &aircraft).unwrap();

            for pair in report.ranked.windows(2) {
                prop_assert!(pair[0].distance_km <= pair[1].distance_km);
            }
            prop_assert_eq!(report.ranked.len() + report.skipped.len(), aircraft.len());
        }
    }
}
