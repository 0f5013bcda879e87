use chrono::{Duration, NaiveDateTime, Timelike};

/// Floor a timestamp to the start of its minute.
///
/// Seconds and sub-second components are zeroed; date, hour and minute are
/// preserved. The floored timestamp is the join key between the pollution
/// and weather streams, which sample independently within the same minute.
pub fn floor_to_minute(timestamp: NaiveDateTime) -> NaiveDateTime {
    timestamp
        - Duration::seconds(timestamp.second() as i64)
        - Duration::nanoseconds(timestamp.nanosecond() as i64)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::NaiveDate;

    fn ts(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_floor_zeroes_seconds() {
        assert_eq!(floor_to_minute(ts(10, 0, 7)), ts(10, 0, 0));
        assert_eq!(floor_to_minute(ts(23, 59, 59)), ts(23, 59, 0));
    }

    #[test]
    fn test_floor_preserves_date_hour_minute() {
        let floored = floor_to_minute(ts(13, 37, 42));
        assert_eq!(floored, ts(13, 37, 0));
    }

    #[test]
    fn test_floor_is_idempotent() {
        let once = floor_to_minute(ts(8, 15, 31));
        assert_eq!(floor_to_minute(once), once);
    }

    #[test]
    fn test_floor_zeroes_subseconds() {
        let with_micros = ts(10, 0, 7) + Duration::microseconds(250_000);
        assert_eq!(floor_to_minute(with_micros), ts(10, 0, 0));
    }
}
