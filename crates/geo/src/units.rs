//! Distance display units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Miles per kilometer.
pub const KM_TO_MILES: f64 = 0.621371;

/// Unit a distance is displayed in. Computation is always in kilometers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceUnit {
    #[default]
    #[serde(rename = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    Miles,
}

impl DistanceUnit {
    /// Short unit label.
    pub fn symbol(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Miles => "mi",
        }
    }

    /// Converts a distance in kilometers to this unit.
    #[inline]
    pub fn convert(self, distance_km: f64) -> f64 {
        match self {
            DistanceUnit::Kilometers => distance_km,
            DistanceUnit::Miles => distance_km * KM_TO_MILES,
        }
    }

    /// Formats a distance with two decimals and the unit label, or `—` when
    /// there is no distance.
    pub fn format(self, distance_km: Option<f64>) -> String {
        match distance_km {
            Some(km) => format!("{:.2} {}", self.convert(km), self.symbol()),
            None => "—".to_string(),
        }
    }
}

impl fmt::Display for DistanceUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DistanceUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometers" => Ok(DistanceUnit::Kilometers),
            "mi" | "miles" => Ok(DistanceUnit::Miles),
            other => Err(format!("unknown distance unit `{other}` (expected km or mi)")),
        }
    }
}
