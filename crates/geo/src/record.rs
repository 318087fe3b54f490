//! Aircraft and group records as supplied by upstream telemetry.
//!
//! Telemetry arrives as loosely-shaped JSON. These types make the optional
//! fields and their fallback order explicit instead of doing key lookups at
//! each use site.

use serde::{Deserialize, Deserializer, Serialize};

/// Callsign reported for records that carry none.
pub const UNKNOWN_CALLSIGN: &str = "unknown";

/// Name reported for groups that carry none.
pub const UNNAMED_FLEET: &str = "Unnamed Fleet";

/// A single aircraft position report.
///
/// Numeric fields holding a non-numeric JSON value (a string, a bool, ...)
/// deserialize as `None` and are treated as missing. Text fields holding a
/// number or bool keep its JSON text; arrays and objects count as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AircraftRecord {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub callsign: Option<String>,
    /// ICAO 24-bit transponder address (hex)
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub icao24: Option<String>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
    /// Older feeds report altitude under this name
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
}

impl AircraftRecord {
    /// Creates a record with a callsign and position.
    pub fn new(callsign: impl Into<String>, lat: f64, lon: f64) -> Self {
        Self {
            callsign: Some(callsign.into()),
            lat: Some(lat),
            lon: Some(lon),
            ..Self::default()
        }
    }

    /// Sets the `altitude` field.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Callsign, or `"unknown"` when absent.
    pub fn callsign(&self) -> &str {
        self.callsign.as_deref().unwrap_or(UNKNOWN_CALLSIGN)
    }

    /// Altitude, preferring `altitude` over `altitude_m`.
    pub fn altitude(&self) -> Option<f64> {
        self.altitude.or(self.altitude_m)
    }
}

/// A named collection of aircraft.
///
/// Two spellings exist for each field. Resolution order:
/// * name: `name`, then `group_name`, then `"Unnamed Fleet"`
/// * aircraft: `aircraft`, then `aircraft_list`, then empty
///
/// An empty string or empty list counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Group {
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string", skip_serializing_if = "Option::is_none")]
    pub group_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft: Option<Vec<AircraftRecord>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_list: Option<Vec<AircraftRecord>>,
}

impl Group {
    /// Creates a group using the primary field names.
    pub fn new(name: impl Into<String>, aircraft: Vec<AircraftRecord>) -> Self {
        Self {
            name: Some(name.into()),
            aircraft: Some(aircraft),
            ..Self::default()
        }
    }

    /// Resolved group name.
    pub fn resolved_name(&self) -> &str {
        [self.name.as_deref(), self.group_name.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(UNNAMED_FLEET)
    }

    /// Resolved aircraft list.
    pub fn resolved_aircraft(&self) -> &[AircraftRecord] {
        [self.aircraft.as_deref(), self.aircraft_list.as_deref()]
            .into_iter()
            .flatten()
            .find(|list| !list.is_empty())
            .unwrap_or(&[])
    }
}

/// Accepts any JSON value and keeps it only if it is a number.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| v.as_f64()))
}

/// Accepts any JSON value; strings pass through and scalars keep their JSON text.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(v @ (serde_json::Value::Number(_) | serde_json::Value::Bool(_))) => Some(v.to_string()),
        _ => None,
    })
}
