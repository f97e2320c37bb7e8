//! Refrigeration and storage zones.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Record;
use crate::error::Error;

/// Deviation from target (in the zone's unit) that raises a warning.
pub const DEFAULT_WARNING_DELTA: f64 = 2.0;

/// Temperature scale for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TempUnit {
    /// Degrees Celsius.
    #[default]
    C,
    /// Degrees Fahrenheit.
    F,
}

impl fmt::Display for TempUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::C => write!(f, "°C"),
            Self::F => write!(f, "°F"),
        }
    }
}

/// Health of a zone's current reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneStatus {
    /// Within range and close to target.
    Normal,
    /// Within range but drifting from target.
    Warning,
    /// Outside the allowed range.
    Alert,
}

impl fmt::Display for ZoneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal => write!(f, "Normal"),
            Self::Warning => write!(f, "Warning"),
            Self::Alert => write!(f, "Alert"),
        }
    }
}

/// Editable numeric field of a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneField {
    /// The latest reading.
    Current,
    /// The desired temperature.
    Target,
    /// Lowest acceptable temperature.
    Min,
    /// Highest acceptable temperature.
    Max,
}

impl ZoneField {
    /// Field name as used in messages.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Current => "currentTemp",
            Self::Target => "targetTemp",
            Self::Min => "minTemp",
            Self::Max => "maxTemp",
        }
    }
}

impl FromStr for ZoneField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "current" | "currenttemp" => Ok(Self::Current),
            "target" | "targettemp" => Ok(Self::Target),
            "min" | "mintemp" => Ok(Self::Min),
            "max" | "maxtemp" => Ok(Self::Max),
            other => Err(Error::invalid_field(
                "field",
                format!("unknown zone field: {other}"),
            )),
        }
    }
}

/// A monitored storage zone.
///
/// `min_temp <= max_temp` is expected but not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureZone {
    /// Unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Latest reading.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub current_temp: f64,
    /// Desired temperature.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub target_temp: f64,
    /// Lowest acceptable temperature.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub min_temp: f64,
    /// Highest acceptable temperature.
    #[serde(deserialize_with = "super::number::deserialize")]
    pub max_temp: f64,
    /// Scale of all four temperatures.
    pub unit: TempUnit,
}

impl TemperatureZone {
    /// Whether the current reading lies outside `[min_temp, max_temp]`.
    #[must_use]
    pub fn is_out_of_range(&self) -> bool {
        self.current_temp < self.min_temp || self.current_temp > self.max_temp
    }

    /// Status of the zone. Alert takes precedence over Warning.
    #[must_use]
    pub fn status(&self, warning_delta: f64) -> ZoneStatus {
        if self.is_out_of_range() {
            ZoneStatus::Alert
        } else if (self.current_temp - self.target_temp).abs() > warning_delta {
            ZoneStatus::Warning
        } else {
            ZoneStatus::Normal
        }
    }

    /// Read one of the editable fields.
    #[must_use]
    pub fn field(&self, field: ZoneField) -> f64 {
        match field {
            ZoneField::Current => self.current_temp,
            ZoneField::Target => self.target_temp,
            ZoneField::Min => self.min_temp,
            ZoneField::Max => self.max_temp,
        }
    }

    /// Overwrite one of the editable fields.
    pub fn set_field(&mut self, field: ZoneField, value: f64) {
        match field {
            ZoneField::Current => self.current_temp = value,
            ZoneField::Target => self.target_temp = value,
            ZoneField::Min => self.min_temp = value,
            ZoneField::Max => self.max_temp = value,
        }
    }
}

impl Record for TemperatureZone {
    const KEY: &'static str = "temperatureZones";
    const NAME: &'static str = "temperature zone";

    fn id(&self) -> &str {
        &self.id
    }

    fn seed(_now: DateTime<Utc>) -> Vec<Self> {
        let zone = |id: &str, name: &str, current: f64, target: f64, min: f64, max: f64| Self {
            id: id.to_string(),
            name: name.to_string(),
            current_temp: current,
            target_temp: target,
            min_temp: min,
            max_temp: max,
            unit: TempUnit::C,
        };
        vec![
            zone("1", "Refrigerator", 4.0, 4.0, 0.0, 5.0),
            zone("2", "Freezer", -18.0, -18.0, -25.0, -15.0),
            zone("3", "Pantry", 22.0, 20.0, 15.0, 25.0),
        ]
    }
}
