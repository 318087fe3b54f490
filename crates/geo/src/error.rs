//! Error types for the geo crate.

use thiserror::Error;

/// Result type alias for geo operations.
pub type Result<T> = std::result::Result<T, GeoError>;

/// Errors that can occur during geo operations.
#[derive(Debug, Error)]
pub enum GeoError {
    /// Coordinate is absent or not a number
    #[error("Missing coordinate: {field}")]
    MissingCoordinate { field: String },

    /// Coordinate is a number but not finite (NaN or infinite)
    #[error("Invalid coordinate: {field}")]
    InvalidCoordinate { field: String },

    /// Coordinate is finite but outside the valid degree range
    #[error("Coordinate out of range: {field} = {value}")]
    OutOfRange { field: String, value: f64 },

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Error code for structured error reporting.
/// Range: 10xxx for geo errors.
#[repr(u32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoErrorCode {
    /// Missing coordinate
    MissingCoordinate = 10001,
    /// Non-finite coordinate
    InvalidCoordinate = 10002,
    /// Coordinate outside -90..=90 / -180..=180
    OutOfRange = 10003,
    /// JSON parsing error
    JsonParsing = 10004,
}

impl GeoError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        GeoError::MissingCoordinate { field: field.into() }
    }

    pub(crate) fn invalid(field: impl Into<String>) -> Self {
        GeoError::InvalidCoordinate { field: field.into() }
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> GeoErrorCode {
        match self {
            GeoError::MissingCoordinate { .. } => GeoErrorCode::MissingCoordinate,
            GeoError::InvalidCoordinate { .. } => GeoErrorCode::InvalidCoordinate,
            GeoError::OutOfRange { .. } => GeoErrorCode::OutOfRange,
            GeoError::JsonError(_) => GeoErrorCode::JsonParsing,
        }
    }

    /// Returns the name of the coordinate field that failed, if any.
    pub fn field(&self) -> Option<&str> {
        match self {
            GeoError::MissingCoordinate { field }
            | GeoError::InvalidCoordinate { field }
            | GeoError::OutOfRange { field, .. } => Some(field),
            GeoError::JsonError(_) => None,
        }
    }
}
