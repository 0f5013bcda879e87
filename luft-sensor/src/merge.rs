use crate::error::Result;
use crate::reading::{
    RawReading, KIND_HUMIDITY, KIND_PM10, KIND_PM25, KIND_PRESSURE, KIND_TEMPERATURE,
};
use crate::record::MergedRecord;

/// Join pollution readings with their nearest-matching weather readings.
///
/// Each pollution reading must carry both PM sub-values (`P1` and `P2`); a
/// reading without them is malformed and the whole merge fails. The join key
/// is the minute-floored timestamp. The first weather reading whose floored
/// timestamp equals the key wins; when several weather readings land on the
/// same minute the earliest-encountered one is used. A matched weather
/// reading must report temperature, pressure and humidity. With no match the
/// record keeps pollution fields only.
///
/// This is an O(pollution x weather) linear scan; a fetch batch is tens of
/// readings, so a keyed lookup is not worth building here.
pub fn merge(pollution: &[RawReading], weather: &[RawReading]) -> Result<Vec<MergedRecord>> {
    let mut records = Vec::with_capacity(pollution.len());
    for reading in pollution {
        let key = reading.minute_key()?;
        let mut record = MergedRecord {
            timestamp: key,
            pm25: reading.numeric_value(KIND_PM25)?,
            pm10: reading.numeric_value(KIND_PM10)?,
            temperature: None,
            pressure: None,
            humidity: None,
        };

        let mut matched = None;
        for candidate in weather {
            if candidate.minute_key()? == key {
                matched = Some(candidate);
                break;
            }
        }
        if let Some(weather_reading) = matched {
            record.temperature = Some(weather_reading.numeric_value(KIND_TEMPERATURE)?);
            record.pressure = Some(weather_reading.numeric_value(KIND_PRESSURE)?);
            record.humidity = Some(weather_reading.numeric_value(KIND_HUMIDITY)?);
        }
        records.push(record);
    }
    Ok(records)
}
