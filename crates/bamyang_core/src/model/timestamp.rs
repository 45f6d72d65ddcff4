//! Millisecond timestamp helpers shared by aggregates and records.
//!
//! Domain timestamps are UTC wall-clock `NaiveDateTime` values truncated to
//! millisecond precision, so they survive the epoch-ms storage column intact.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Timelike, Utc};

/// Current UTC time truncated to whole milliseconds.
pub fn now() -> NaiveDateTime {
    truncate_to_millis(Utc::now().naive_utc())
}

/// Drops any precision finer than one millisecond.
pub fn truncate_to_millis(value: NaiveDateTime) -> NaiveDateTime {
    value.trunc_subsecs(3)
}

/// Whether `value` is stored without loss in an epoch-ms column.
pub fn is_millisecond_precise(value: NaiveDateTime) -> bool {
    value.nanosecond() % 1_000_000 == 0
}

/// Converts a wall-clock value to Unix epoch milliseconds.
pub fn to_epoch_ms(value: NaiveDateTime) -> i64 {
    value.and_utc().timestamp_millis()
}

/// Converts Unix epoch milliseconds back to a wall-clock value.
///
/// Returns `None` when `millis` is outside chrono's representable range.
pub fn from_epoch_ms(millis: i64) -> Option<NaiveDateTime> {
    DateTime::from_timestamp_millis(millis).map(|value| value.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::{from_epoch_ms, is_millisecond_precise, now, to_epoch_ms, truncate_to_millis};
    use chrono::{NaiveDate, Timelike};

    #[test]
    fn epoch_ms_conversion_is_lossless_for_millisecond_values() {
        let value = NaiveDate::from_ymd_opt(2024, 6, 15)
            .and_then(|d| d.and_hms_milli_opt(12, 30, 1, 250))
            .unwrap();
        assert_eq!(from_epoch_ms(to_epoch_ms(value)), Some(value));
    }

    #[test]
    fn now_has_no_sub_millisecond_component() {
        assert_eq!(now().nanosecond() % 1_000_000, 0);
    }

    #[test]
    fn truncate_drops_micro_and_nano_seconds() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 1)
            .and_then(|d| d.and_hms_micro_opt(9, 0, 0, 123_456))
            .unwrap();
        assert!(!is_millisecond_precise(value));

        let truncated = truncate_to_millis(value);
        assert!(is_millisecond_precise(truncated));
        assert_eq!(truncated.to_string(), "2024-03-01 09:00:00.123");
    }
}
