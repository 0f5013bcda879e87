use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One persisted unit: a pollution reading joined with its best-matching
/// weather reading, if any.
///
/// Invariants:
/// - `timestamp` is always minute-floored (zero seconds and sub-seconds).
/// - Weather fields are present only when a weather reading shared the same
///   normalized minute; absent means "no match", never zero.
/// - Records are created once per pollution reading per fetch cycle and are
///   never mutated or deleted afterwards.
///
/// Older record files encoded numeric fields as strings; both encodings are
/// accepted on load, and numbers are always written back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedRecord {
    pub timestamp: NaiveDateTime,
    #[serde(with = "flex_f64")]
    pub pm25: f64,
    #[serde(with = "flex_f64")]
    pub pm10: f64,
    #[serde(default, with = "flex_f64_opt", skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(default, with = "flex_f64_opt", skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    #[serde(default, with = "flex_f64_opt", skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
}

impl MergedRecord {
    /// True if a weather reading was merged into this record.
    pub fn has_weather(&self) -> bool {
        self.temperature.is_some() || self.pressure.is_some() || self.humidity.is_some()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            NumberOrString::Number(v) => Ok(v),
            NumberOrString::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }
}

/// Accept a JSON number or a string-encoded number; emit a number.
mod flex_f64 {
    use super::NumberOrString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        NumberOrString::deserialize(deserializer)?.into_f64()
    }

    pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(*value)
    }
}

/// Optional variant of [`flex_f64`].
mod flex_f64_opt {
    use super::NumberOrString;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumberOrString>::deserialize(deserializer)? {
            Some(v) => Ok(Some(v.into_f64()?)),
            None => Ok(None),
        }
    }

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_f64(*v),
            None => serializer.serialize_none(),
        }
    }
}
