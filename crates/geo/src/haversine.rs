//! Haversine distance calculation.
//!
//! The Haversine formula calculates the great-circle distance between two points
//! on a sphere given their longitudes and latitudes.
//!
//! Nothing in this module validates its inputs. Callers are expected to have
//! run coordinates through [`crate::validation`] first; non-finite input gives
//! a NaN distance.

use crate::Coordinate;

/// Earth's mean radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Calculates the great-circle distance between two coordinates in kilometers.
///
/// The value is not rounded. Use [`distance_km`] for the two-decimal figure
/// reported to callers.
///
/// # Example
/// ```
/// use skywatch_geo::{haversine_distance, Coordinate};
///
/// let berlin = Coordinate::new(52.5200, 13.4050);
/// let paris = Coordinate::new(48.8566, 2.3522);
///
/// let distance = haversine_distance(&berlin, &paris);
/// assert!((distance - 878.0).abs() < 10.0);
/// ```
#[inline]
pub fn haversine_distance(from: &Coordinate, to: &Coordinate) -> f64 {
    let (lat1, lon1) = from.to_radians();
    let (lat2, lon2) = to.to_radians();

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1.0 for near-antipodal points.
    let a = a.min(1.0);

    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Great-circle distance in kilometers between two points given in degrees,
/// rounded to two decimal places.
///
/// # Arguments
/// * `lat1`, `lon1` - First point
/// * `lat2`, `lon2` - Second point
///
/// # Example
/// ```
/// use skywatch_geo::distance_km;
///
/// // London to Paris
/// let d = distance_km(51.5074, -0.1278, 48.8566, 2.3522);
/// assert!((d - 343.56).abs() < 1.0);
/// ```
#[inline]
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let from = Coordinate::new(lat1, lon1);
    let to = Coordinate::new(lat2, lon2);
    round_km(haversine_distance(&from, &to))
}

/// Rounds a distance to two decimal places.
///
/// Rounds the exact decimal value of `distance`, not `distance * 100.0`, whose
/// product can land on a spurious `.5`.
#[inline]
pub(crate) fn round_km(distance: f64) -> f64 {
    format!("{distance:.2}").parse().unwrap_or(distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Test data: known distances between cities
    const BERLIN: Coordinate = Coordinate { latitude: 52.5200, longitude: 13.4050 };
    const PARIS: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };
    const NEW_YORK: Coordinate = Coordinate { latitude: 40.7128, longitude: -74.0060 };
    const TOKYO: Coordinate = Coordinate { latitude: 35.6762, longitude: 139.6503 };

    /// Half of the great-circle circumference, rounded.
    const MAX_DISTANCE_KM: f64 = 20015.09;

    #[test]
    fn test_berlin_to_paris() {
        let distance = haversine_distance(&BERLIN, &PARIS);
        // Expected: ~878 km
        assert!((distance - 878.0).abs() < 5.0, "Berlin-Paris: {}", distance);
    }

    #[test]
    fn test_new_york_to_tokyo() {
        let distance = haversine_distance(&NEW_YORK, &TOKYO);
        // Expected: ~10,838 km
        assert!((distance - 10838.0).abs() < 50.0, "NYC-Tokyo: {}", distance);
    }

    #[test]
    fn test_london_to_paris_rounded() {
        let distance = distance_km(51.5074, -0.1278, 48.8566, 2.3522);
        assert!(distance > 343.0 && distance < 344.0, "London-Paris: {}", distance);
        assert!((distance - 343.56).abs() < 1.0);
    }

    #[test]
    fn test_quarter_circumference() {
        assert_eq!(distance_km(0.0, 0.0, 0.0, 90.0), 10007.54);
    }

    #[test]
    fn test_antipodal_points() {
        assert_eq!(distance_km(0.0, 0.0, 0.0, 180.0), MAX_DISTANCE_KM);
        assert_eq!(distance_km(90.0, 0.0, -90.0, 0.0), MAX_DISTANCE_KM);
    }

    #[test]
    fn test_same_point_zero_distance() {
        assert_eq!(distance_km(52.52, 13.405, 52.52, 13.405), 0.0);
        assert!(haversine_distance(&BERLIN, &BERLIN).abs() < 0.001);
    }

    #[test]
    fn test_antimeridian_crossing() {
        // 1 degree of longitude on the equator either side of 180
        let distance = distance_km(0.0, 179.5, 0.0, -179.5);
        assert!((distance - 111.19).abs() < 0.01, "got {}", distance);
    }

    #[test]
    fn test_rounding_two_decimals() {
        let distance = distance_km(50.1109, 8.6821, 52.5200, 13.4050);
        assert_eq!(distance, round_km(distance));
        assert_eq!(round_km(343.556), 343.56);
        assert_eq!(round_km(0.004), 0.0);
    }

    #[test]
    fn test_rounding_uses_exact_decimal_value() {
        // 1.115 is stored as 1.11499999..., but 1.115 * 100.0 == 111.5
        assert_eq!(round_km(1.115), 1.11);
        assert_eq!(round_km(2.675), 2.67);
    }

    proptest! {
        #[test]
        fn prop_identity(lat in -90.0f64..=90.0, lon in -180.0f64..=180.0) {
            prop_assert_eq!(distance_km(lat, lon, lat, lon), 0.0);
        }

        #[test]
        fn prop_symmetry(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            prop_assert_eq!(
                distance_km(lat1, lon1, lat2, lon2),
                distance_km(lat2, lon2, lat1, lon1)
            );
        }

        #[test]
        fn prop_range_bound(
            lat1 in -90.0f64..=90.0,
            lon1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0,
            lon2 in -180.0f64..=180.0,
        ) {
            let d = distance_km(lat1, lon1, lat2, lon2);
            prop_assert!(d >= 0.0);
            prop_assert!(d <= MAX_DISTANCE_KM + 0.01, "distance {} above bound", d);
        }
    }
}
