//! Coordinate validation.
//!
//! Validation happens once, at the entry points that accept a user position.
//! The distance functions themselves trust their input.

use crate::{Coordinate, GeoError, Result};

/// Field name used for the user's latitude in errors.
pub const USER_LAT: &str = "user_lat";
/// Field name used for the user's longitude in errors.
pub const USER_LON: &str = "user_lon";

/// Ensures a coordinate value is present and finite.
///
/// # Errors
/// * [`GeoError::MissingCoordinate`] when `value` is `None`
/// * [`GeoError::InvalidCoordinate`] when `value` is NaN or infinite
///
/// # Example
/// ```
/// use skywatch_geo::validation::ensure_coordinate;
///
/// assert_eq!(ensure_coordinate(Some(51.5), "user_lat").unwrap(), 51.5);
/// assert!(ensure_coordinate(None, "user_lat").is_err());
/// assert!(ensure_coordinate(Some(f64::NAN), "user_lat").is_err());
/// ```
pub fn ensure_coordinate(value: Option<f64>, field: &str) -> Result<f64> {
    let value = value.ok_or_else(|| GeoError::missing(field))?;
    if !value.is_finite() {
        return Err(GeoError::invalid(field));
    }
    Ok(value)
}

/// Validates the user's reference position.
///
/// Latitude is checked before longitude, so a call with both missing reports
/// `user_lat`.
pub fn ensure_user_position(lat: Option<f64>, lon: Option<f64>) -> Result<Coordinate> {
    let lat = ensure_coordinate(lat, USER_LAT)?;
    let lon = ensure_coordinate(lon, USER_LON)?;
    Ok(Coordinate::new(lat, lon))
}

/// Checks that a finite position lies within -90..=90 latitude and
/// -180..=180 longitude.
///
/// Not applied by the ranking functions, whose contract only requires finite
/// input. Request boundaries that accept a position from outside call this.
pub fn ensure_in_range(coord: Coordinate) -> Result<Coordinate> {
    if coord.is_valid() {
        return Ok(coord);
    }
    if !(-90.0..=90.0).contains(&coord.latitude) {
        return Err(GeoError::OutOfRange {
            field: USER_LAT.to_string(),
            value: coord.latitude,
        });
    }
    if !(-180.0..=180.0).contains(&coord.longitude) {
        return Err(GeoError::OutOfRange {
            field: USER_LON.to_string(),
            value: coord.longitude,
        });
    }
    Ok(coord)
}
