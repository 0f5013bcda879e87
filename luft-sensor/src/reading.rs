use crate::error::{Result, SensorError};
use crate::timestamp::floor_to_minute;
use chrono::NaiveDateTime;
use serde::Deserialize;

/// Timestamp format used by the airrohr API: "YYYY-MM-DD HH:MM:SS"
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Value kind tag for PM10 readings
pub const KIND_PM10: &str = "P1";
/// Value kind tag for PM2.5 readings
pub const KIND_PM25: &str = "P2";
/// Value kind tag for temperature readings (degrees Celsius)
pub const KIND_TEMPERATURE: &str = "temperature";
/// Value kind tag for pressure readings (Pascal, raw sensor unit)
pub const KIND_PRESSURE: &str = "pressure";
/// Value kind tag for relative humidity readings (percent)
pub const KIND_HUMIDITY: &str = "humidity";

/// A single typed sub-value inside a reading, tagged by kind.
///
/// The API encodes every value as a string, even numeric ones.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SensorDataValue {
    pub value_type: String,
    pub value: String,
}

/// One raw reading as returned by the airrohr API.
///
/// A pollution reading carries `P1`/`P2` sub-values; a weather reading
/// carries `temperature`/`pressure`/`humidity`. Unknown payload fields
/// (sensor metadata, location, sampling rate) are ignored on decode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawReading {
    pub timestamp: String,
    pub sensordatavalues: Vec<SensorDataValue>,
}

impl RawReading {
    /// Parse the reading's timestamp (second precision, sensor-local time).
    pub fn parsed_timestamp(&self) -> Result<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).map_err(|source| {
            SensorError::TimestampParse {
                value: self.timestamp.clone(),
                source,
            }
        })
    }

    /// The reading's minute-floored timestamp, used as the merge key.
    pub fn minute_key(&self) -> Result<NaiveDateTime> {
        Ok(floor_to_minute(self.parsed_timestamp()?))
    }

    /// First sub-value of the given kind, if the reading reports one.
    pub fn raw_value(&self, kind: &str) -> Option<&str> {
        self.sensordatavalues
            .iter()
            .find(|v| v.value_type == kind)
            .map(|v| v.value.as_str())
    }

    /// Numeric sub-value of the given kind.
    ///
    /// A reading that should report this kind but does not is malformed;
    /// both the missing and the non-numeric case are errors.
    pub fn numeric_value(&self, kind: &'static str) -> Result<f64> {
        let raw = self
            .raw_value(kind)
            .ok_or_else(|| SensorError::MissingValue {
                timestamp: self.timestamp.clone(),
                kind,
            })?;
        raw.trim()
            .parse::<f64>()
            .map_err(|_| SensorError::NonNumericValue {
                kind: kind.to_string(),
                value: raw.to_string(),
            })
    }
}
