//! Series extraction and gap-aware resampling for merged sensor records.
//!
//! This crate turns the persisted record history into chart-ready
//! (timestamps, values) pairs: a relative time window picks the records,
//! a field selector pulls one measurement out of each, and the resampler
//! marks sampling gaps so charts show breaks instead of drawing a
//! misleading line across missing data.

/// Window-filtered field extraction from the record history.
pub mod series {
    use chrono::{Duration, NaiveDateTime};
    use luft_sensor::record::MergedRecord;

    /// The measurements a series can be extracted for.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum Field {
        Pm25,
        Pm10,
        Temperature,
        Pressure,
        Humidity,
    }

    impl Field {
        pub const ALL: [Field; 5] = [
            Field::Pm25,
            Field::Pm10,
            Field::Temperature,
            Field::Pressure,
            Field::Humidity,
        ];

        /// Short name, used for chart file names.
        pub fn name(&self) -> &'static str {
            match self {
                Field::Pm25 => "pm25",
                Field::Pm10 => "pm10",
                Field::Temperature => "temperature",
                Field::Pressure => "pressure",
                Field::Humidity => "humidity",
            }
        }

        /// Human-readable label with display unit, used for chart titles.
        pub fn label(&self) -> &'static str {
            match self {
                Field::Pm25 => "PM2.5 (ug/m3)",
                Field::Pm10 => "PM10 (ug/m3)",
                Field::Temperature => "Temperature (C)",
                Field::Pressure => "Pressure (hPa)",
                Field::Humidity => "Humidity (%)",
            }
        }

        /// The field's value on a record, in display units.
        ///
        /// Pressure is reported by the sensor in Pascal and stored raw;
        /// it is converted to hectopascal here, at extraction time.
        /// Absent optional fields yield `None` (the record is skipped for
        /// this field, not zero-filled).
        pub fn value(&self, record: &MergedRecord) -> Option<f64> {
            match self {
                Field::Pm25 => Some(record.pm25),
                Field::Pm10 => Some(record.pm10),
                Field::Temperature => record.temperature,
                Field::Pressure => record.pressure.map(|p| p / 100.0),
                Field::Humidity => record.humidity,
            }
        }
    }

    /// Extract one field as an ordered (timestamps, values) pair.
    ///
    /// Keeps records whose timestamp lies within `lookback` of `now`; the
    /// boundary at exactly `now - lookback` is included. Records lacking
    /// the field are skipped entirely. Store order (ascending by
    /// timestamp) is preserved, and both outputs always have equal length.
    pub fn extract(
        records: &[MergedRecord],
        now: NaiveDateTime,
        lookback: Duration,
        field: Field,
    ) -> (Vec<NaiveDateTime>, Vec<f64>) {
        let cutoff = now - lookback;
        let mut timestamps = Vec::new();
        let mut values = Vec::new();
        for record in records {
            if record.timestamp < cutoff {
                continue;
            }
            if let Some(value) = field.value(record) {
                timestamps.push(record.timestamp);
                values.push(value);
            }
        }
        (timestamps, values)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn record(day: u32, hour: u32, pressure: Option<f64>) -> MergedRecord {
            MergedRecord {
                timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
                    .unwrap()
                    .and_hms_opt(hour, 0, 0)
                    .unwrap(),
                pm25: 5.6,
                pm10: 12.3,
                temperature: None,
                pressure,
                humidity: None,
            }
        }

        #[test]
        fn test_extract_pressure_converts_to_hpa() {
            let records = vec![record(10, 12, Some(101300.0))];
            let now = NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap();
            let (timestamps, values) =
                extract(&records, now, Duration::hours(24), Field::Pressure);
            assert_eq!(timestamps.len(), 1);
            assert_eq!(values, vec![1013.0]);
        }

        #[test]
        fn test_extract_skips_records_without_field() {
            let records = vec![record(10, 11, None), record(10, 12, Some(101300.0))];
            let now = NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(13, 0, 0)
                .unwrap();
            let (timestamps, values) =
                extract(&records, now, Duration::hours(24), Field::Pressure);
            assert_eq!(timestamps.len(), 1);
            assert_eq!(values.len(), 1);
            // pm fields are always present, so the same records yield two points
            let (pm_timestamps, _) = extract(&records, now, Duration::hours(24), Field::Pm25);
            assert_eq!(pm_timestamps.len(), 2);
        }

        #[test]
        fn test_extract_window_boundary_is_inclusive() {
            let now = NaiveDate::from_ymd_opt(2024, 1, 10)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap();
            let exactly_seven_days = record(3, 12, None); // 2024-01-03 12:00
            let six_days_old = record(4, 12, None);
            let older = record(3, 11, None);
            let records = vec![older, exactly_seven_days, six_days_old];
            let (timestamps, _) = extract(&records, now, Duration::days(7), Field::Pm25);
            assert_eq!(timestamps.len(), 2);
            assert_eq!(
                timestamps[0],
                NaiveDate::from_ymd_opt(2024, 1, 3)
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
            );
        }

        #[test]
        fn test_extract_empty_window() {
            let records = vec![record(1, 0, None)];
            let now = NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap();
            let (timestamps, values) = extract(&records, now, Duration::hours(24), Field::Pm25);
            assert!(timestamps.is_empty());
            assert!(values.is_empty());
        }
    }
}

/// Gap-marker insertion for intermittent sensor uptime.
pub mod gaps {
    use chrono::{Duration, NaiveDateTime};

    /// Gap threshold applied by the chart pipeline. Sensors report about
    /// every 2.5 minutes, so half an hour of silence is a real outage.
    pub const DEFAULT_GAP_THRESHOLD_MINUTES: i64 = 30;

    /// The synthetic break point sits this far past the gap's left edge.
    pub const GAP_MARKER_OFFSET_MINUTES: i64 = 3;

    /// Insert NAN break points wherever consecutive timestamps are further
    /// apart than `threshold`.
    ///
    /// The series is re-sorted by timestamp first (extraction order is
    /// expected ascending but not guaranteed once window filters meet
    /// unsorted input). For each gap one synthetic point is inserted three
    /// minutes after the earlier timestamp, carrying `f64::NAN`; renderers
    /// treat it as a line break rather than interpolating across the gap.
    /// Zero- or one-point series come back unchanged. The output is never
    /// shorter than the input.
    pub fn insert_gap_markers(
        timestamps: &[NaiveDateTime],
        values: &[f64],
        threshold: Duration,
    ) -> (Vec<NaiveDateTime>, Vec<f64>) {
        if timestamps.len() <= 1 {
            return (timestamps.to_vec(), values.to_vec());
        }

        let mut points: Vec<(NaiveDateTime, f64)> = timestamps
            .iter()
            .copied()
            .zip(values.iter().copied())
            .collect();
        points.sort_by_key(|(timestamp, _)| *timestamp);

        let mut out_timestamps = Vec::with_capacity(points.len());
        let mut out_values = Vec::with_capacity(points.len());
        for window in points.windows(2) {
            let (earlier, value) = window[0];
            let (later, _) = window[1];
            out_timestamps.push(earlier);
            out_values.push(value);
            if later - earlier > threshold {
                out_timestamps.push(earlier + Duration::minutes(GAP_MARKER_OFFSET_MINUTES));
                out_values.push(f64::NAN);
            }
        }
        if let Some(&(last_timestamp, last_value)) = points.last() {
            out_timestamps.push(last_timestamp);
            out_values.push(last_value);
        }
        (out_timestamps, out_values)
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        fn t0() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap()
        }

        #[test]
        fn test_gap_inserts_nan_marker() {
            let timestamps = vec![t0(), t0() + Duration::minutes(60)];
            let values = vec![5.0, 6.0];
            let (out_t, out_v) =
                insert_gap_markers(&timestamps, &values, Duration::minutes(30));
            assert_eq!(out_t.len(), 3);
            assert_eq!(out_v.len(), 3);
            assert_eq!(out_t[0], t0());
            assert_eq!(out_v[0], 5.0);
            assert_eq!(out_t[1], t0() + Duration::minutes(3));
            assert!(out_v[1].is_nan());
            assert_eq!(out_t[2], t0() + Duration::minutes(60));
            assert_eq!(out_v[2], 6.0);
        }

        #[test]
        fn test_no_marker_at_or_below_threshold() {
            let timestamps = vec![t0(), t0() + Duration::minutes(30)];
            let values = vec![5.0, 6.0];
            let (out_t, out_v) =
                insert_gap_markers(&timestamps, &values, Duration::minutes(30));
            assert_eq!(out_t, timestamps);
            assert_eq!(out_v, values);
        }

        #[test]
        fn test_short_series_unchanged() {
            let empty: Vec<NaiveDateTime> = Vec::new();
            let (out_t, out_v) = insert_gap_markers(&empty, &[], Duration::minutes(30));
            assert!(out_t.is_empty());
            assert!(out_v.is_empty());

            let single = vec![t0()];
            let (out_t, out_v) = insert_gap_markers(&single, &[7.0], Duration::minutes(30));
            assert_eq!(out_t, single);
            assert_eq!(out_v, vec![7.0]);
        }

        #[test]
        fn test_unsorted_input_is_resorted() {
            let timestamps = vec![t0() + Duration::minutes(60), t0()];
            let values = vec![6.0, 5.0];
            let (out_t, out_v) =
                insert_gap_markers(&timestamps, &values, Duration::minutes(30));
            assert_eq!(out_t[0], t0());
            assert_eq!(out_v[0], 5.0);
            assert!(out_v[1].is_nan());
            assert_eq!(*out_t.last().unwrap(), t0() + Duration::minutes(60));
        }

        #[test]
        fn test_multiple_gaps() {
            let timestamps = vec![
                t0(),
                t0() + Duration::minutes(90),
                t0() + Duration::minutes(95),
                t0() + Duration::minutes(200),
            ];
            let values = vec![1.0, 2.0, 3.0, 4.0];
            let (out_t, out_v) =
                insert_gap_markers(&timestamps, &values, Duration::minutes(30));
            assert_eq!(out_t.len(), 6);
            let nan_count = out_v.iter().filter(|v| v.is_nan()).count();
            assert_eq!(nan_count, 2);
        }
    }
}
