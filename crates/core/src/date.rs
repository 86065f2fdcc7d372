//! Expiration dates and day-count arithmetic.

use core::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InventoryError;

const SECONDS_PER_DAY: i64 = 86_400;

/// Calendar date on which an item expires (no time-of-day).
///
/// Parsed strictly from `YYYY-MM-DD`: four-digit year, two-digit month and
/// day, hyphen separated. Compared against instants as midnight UTC.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpirationDate(NaiveDate);

impl ExpirationDate {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build from year/month/day, `None` if the date does not exist.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The instant this date begins (00:00:00 UTC).
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.0.and_time(chrono::NaiveTime::MIN).and_utc()
    }

    /// Whole days from `now` until this date begins, floored.
    ///
    /// Later the same day yields 0; any instant after midnight of an earlier
    /// date yields a negative count.
    pub fn days_until(&self, now: DateTime<Utc>) -> i64 {
        days_between(now, self.starts_at())
    }
}

impl core::fmt::Display for ExpirationDate {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for ExpirationDate {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.as_bytes();
        let well_formed = bytes.len() == 10
            && bytes.iter().enumerate().all(|(i, b)| match i {
                4 | 7 => *b == b'-',
                _ => b.is_ascii_digit(),
            });
        if !well_formed {
            return Err(InventoryError::date_parse(s, "expected YYYY-MM-DD"));
        }

        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Self)
            .map_err(|e| InventoryError::date_parse(s, e.to_string()))
    }
}

impl From<NaiveDate> for ExpirationDate {
    fn from(value: NaiveDate) -> Self {
        Self(value)
    }
}

/// Floor of `(later - earlier)` in days.
pub fn days_between(earlier: DateTime<Utc>, later: DateTime<Utc>) -> i64 {
    (later - earlier).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// `now + days`, the inclusive upper bound of an expiration window.
///
/// Saturates at the latest representable instant, so an oversized window
/// covers every date.
pub fn window_end(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    Duration::try_days(i64::from(days))
        .and_then(|span| now.checked_add_signed(span))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn parses_canonical_format() {
        let date: ExpirationDate = "2025-01-10".parse().unwrap();
        assert_eq!(date, ExpirationDate::from_ymd(2025, 1, 10).unwrap());
        assert_eq!(date.to_string(), "2025-01-10");
    }

    #[test]
    fn rejects_malformed_dates() {
        for input in [
            "2025-1-10",
            "25-01-10",
            "2025/01/10",
            "2025-01-10T00:00",
            " 2025-01-10",
            "2025-02-30",
            "2025-13-01",
            "",
        ] {
            let err = input.parse::<ExpirationDate>().unwrap_err();
            assert!(
                matches!(err, InventoryError::DateParse { .. }),
                "expected DateParse for {input:?}"
            );
        }
    }

    #[test]
    fn days_until_floors_toward_earlier_time() {
        let date = ExpirationDate::from_ymd(2025, 1, 10).unwrap();
        assert_eq!(date.days_until(at(2025, 1, 8, 0)), 2);
        assert_eq!(date.days_until(at(2025, 1, 8, 12)), 1);
        assert_eq!(date.days_until(at(2025, 1, 9, 23)), 0);
        assert_eq!(date.days_until(at(2025, 1, 10, 0)), 0);
        // Chrono's `num_days` would truncate this to 0.
        assert_eq!(date.days_until(at(2025, 1, 10, 6)), -1);
    }

    #[test]
    fn window_end_adds_whole_days() {
        assert_eq!(window_end(at(2025, 1, 8, 9), 3), at(2025, 1, 11, 9));
        assert_eq!(window_end(at(2025, 1, 8, 9), 0), at(2025, 1, 8, 9));
    }

    #[test]
    fn window_end_saturates_past_max_date() {
        assert_eq!(window_end(at(2025, 1, 8, 9), u32::MAX), DateTime::<Utc>::MAX_UTC);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: any real date prints and parses back to itself.
        #[test]
        fn display_is_parseable(days in 0i64..200_000) {
            let base = NaiveDate::from_ymd_opt(1900, 1, 1).unwrap();
            let date = ExpirationDate::new(base + Duration::days(days));
            let reparsed: ExpirationDate = date.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, date);
        }

        /// Property: floored day count never overstates the remaining time.
        #[test]
        fn days_between_is_floor(offset_secs in -10_000_000i64..10_000_000) {
            let earlier = at(2025, 6, 1, 0);
            let later = earlier + Duration::seconds(offset_secs);
            let days = days_between(earlier, later);
            prop_assert!(days * SECONDS_PER_DAY <= offset_secs);
            prop_assert!((days + 1) * SECONDS_PER_DAY > offset_secs);
        }
    }
}
