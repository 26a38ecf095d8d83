use crate::utils::error::{RaceError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;
use std::sync::OnceLock;

const SECONDS_PER_MINUTE: u64 = 60;

/// Elapsed time in whole seconds.
///
/// Values are immutable; arithmetic returns a new `Duration`. Two durations are
/// equal when their total seconds are equal, however they were built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    total_seconds: u64,
}

impl Duration {
    pub const ZERO: Duration = Duration { total_seconds: 0 };

    pub const fn from_seconds(seconds: u64) -> Self {
        Self {
            total_seconds: seconds,
        }
    }

    /// `seconds` must be in `0..=59`.
    pub fn from_minutes_and_seconds(minutes: u64, seconds: u64) -> Result<Self> {
        if seconds >= SECONDS_PER_MINUTE {
            return Err(RaceError::invalid_duration(format!(
                "seconds must be between 0 and 59, got {}",
                seconds
            )));
        }

        let total_seconds = minutes
            .checked_mul(SECONDS_PER_MINUTE)
            .and_then(|s| s.checked_add(seconds))
            .ok_or_else(|| RaceError::invalid_duration(format!("{} minutes is too large", minutes)))?;

        Ok(Self { total_seconds })
    }

    pub const fn total_seconds(&self) -> u64 {
        self.total_seconds
    }

    pub const fn minutes(&self) -> u64 {
        self.total_seconds / SECONDS_PER_MINUTE
    }

    /// Seconds past the last whole minute.
    pub const fn seconds(&self) -> u64 {
        self.total_seconds % SECONDS_PER_MINUTE
    }

    pub const fn is_zero(&self) -> bool {
        self.total_seconds == 0
    }

    /// Saturates at `u64::MAX` seconds; use [`checked_plus`](Self::checked_plus)
    /// to detect that.
    pub fn plus(&self, other: Duration) -> Duration {
        Duration::from_seconds(self.total_seconds.saturating_add(other.total_seconds))
    }

    pub fn checked_plus(&self, other: Duration) -> Option<Duration> {
        self.total_seconds
            .checked_add(other.total_seconds)
            .map(Duration::from_seconds)
    }

    /// Fails with `InvalidDuration` instead of going below zero.
    pub fn minus(&self, other: Duration) -> Result<Duration> {
        self.checked_minus(other).ok_or_else(|| {
            RaceError::invalid_duration(format!("cannot subtract {} from {}", other, self))
        })
    }

    pub fn checked_minus(&self, other: Duration) -> Option<Duration> {
        self.total_seconds
            .checked_sub(other.total_seconds)
            .map(Duration::from_seconds)
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m {}s", self.minutes(), self.seconds())
    }
}

impl Add for Duration {
    type Output = Duration;

    fn add(self, rhs: Duration) -> Duration {
        self.plus(rhs)
    }
}

impl AddAssign for Duration {
    fn add_assign(&mut self, rhs: Duration) {
        *self = self.plus(rhs);
    }
}

impl Sum for Duration {
    fn sum<I: Iterator<Item = Duration>>(iter: I) -> Duration {
        iter.fold(Duration::ZERO, Duration::add)
    }
}

impl<'a> Sum<&'a Duration> for Duration {
    fn sum<I: Iterator<Item = &'a Duration>>(iter: I) -> Duration {
        iter.copied().sum()
    }
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^\s*(?:(?P<min>\d+)m\s*(?P<sec>\d+)s|(?P<clock_min>\d+):(?P<clock_sec>\d{2})|(?P<total>\d+))\s*$",
        )
        .expect("duration pattern is valid")
    })
}

impl FromStr for Duration {
    type Err = RaceError;

    /// 接受 "2m 30s"、"2:30" 或純秒數 "150"
    fn from_str(s: &str) -> Result<Self> {
        let caps = duration_pattern().captures(s).ok_or_else(|| {
            RaceError::invalid_duration(format!(
                "'{}' is not a time, expected e.g. '2m 30s', '2:30' or '150'",
                s.trim()
            ))
        })?;

        let number = |name: &str| -> Result<Option<u64>> {
            caps.name(name)
                .map(|m| {
                    m.as_str()
                        .parse::<u64>()
                        .map_err(|e| RaceError::invalid_duration(format!("'{}': {}", m.as_str(), e)))
                })
                .transpose()
        };

        if let Some(total) = number("total")? {
            return Ok(Duration::from_seconds(total));
        }

        let minutes = number("min")?.or(number("clock_min")?).unwrap_or(0);
        let seconds = number("sec")?.or(number("clock_sec")?).unwrap_or(0);
        Duration::from_minutes_and_seconds(minutes, seconds)
    }
}

/// One participant's time in one sport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RaceResult {
    pub participant_id: String,
    pub sport_type: String,
    pub duration: Duration,
}

impl RaceResult {
    pub fn new(
        participant_id: impl Into<String>,
        sport_type: impl Into<String>,
        duration: Duration,
    ) -> Self {
        Self {
            participant_id: participant_id.into(),
            sport_type: sport_type.into(),
            duration,
        }
    }

    pub fn matches(&self, participant_id: &str, sport_type: &str) -> bool {
        self.participant_id == participant_id && self.sport_type == sport_type
    }
}

/// Persisted shape of a [`RaceResult`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RaceRecord {
    pub participant_id: String,
    pub sport_type: String,
    pub duration_seconds: u64,
}

impl From<RaceRecord> for RaceResult {
    fn from(record: RaceRecord) -> Self {
        RaceResult::new(
            record.participant_id,
            record.sport_type,
            Duration::from_seconds(record.duration_seconds),
        )
    }
}

impl From<&RaceResult> for RaceRecord {
    fn from(result: &RaceResult) -> Self {
        RaceRecord {
            participant_id: result.participant_id.clone(),
            sport_type: result.sport_type.clone(),
            duration_seconds: result.duration.total_seconds(),
        }
    }
}

/// A participant's combined time across every recorded sport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub participant_id: String,
    pub total: Duration,
    pub results: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_has_no_padding() {
        assert_eq!(Duration::from_seconds(90).to_string(), "1m 30s");
        assert_eq!(Duration::from_seconds(255).to_string(), "4m 15s");
        assert_eq!(Duration::from_seconds(180).to_string(), "3m 0s");
        assert_eq!(Duration::from_seconds(5).to_string(), "0m 5s");
        assert_eq!(Duration::ZERO.to_string(), "0m 0s");
    }

    #[test]
    fn test_from_minutes_and_seconds_renders_inputs() {
        for minutes in [0u64, 1, 2, 59, 60, 125, 10_000] {
            for seconds in 0..60u64 {
                let d = Duration::from_minutes_and_seconds(minutes, seconds).unwrap();
                assert_eq!(d.to_string(), format!("{}m {}s", minutes, seconds));
                assert_eq!(d.total_seconds(), minutes * 60 + seconds);
            }
        }
    }

    #[test]
    fn test_from_minutes_and_seconds_rejects_overflowing_seconds() {
        let err = Duration::from_minutes_and_seconds(1, 60).unwrap_err();
        assert!(matches!(err, RaceError::InvalidDuration { .. }));
        assert!(Duration::from_minutes_and_seconds(u64::MAX, 0).is_err());
    }

    #[test]
    fn test_equality_is_by_total_seconds() {
        let a = Duration::from_seconds(90);
        let b = Duration::from_minutes_and_seconds(1, 30).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.plus(b), Duration::from_seconds(180));
    }

    #[test]
    fn test_plus_then_minus_round_trips() {
        let values = [0u64, 1, 59, 60, 61, 150, 3_599, 86_400];
        for &x in &values {
            for &y in &values {
                let a = Duration::from_seconds(x);
                let b = Duration::from_seconds(y);
                assert_eq!(a.plus(b).minus(b).unwrap(), a);
            }
        }
    }

    #[test]
    fn test_plus_saturates_and_checked_plus_reports_overflow() {
        let near_max = Duration::from_seconds(u64::MAX - 1);
        let five = Duration::from_seconds(5);

        assert_eq!(near_max.plus(five), Duration::from_seconds(u64::MAX));
        assert_eq!(near_max.checked_plus(five), None);
        assert_eq!(
            Duration::from_seconds(150).checked_plus(Duration::from_seconds(105)),
            Some(Duration::from_seconds(255))
        );
    }

    #[test]
    fn test_minus_underflow_fails() {
        let small = Duration::from_seconds(30);
        let big = Duration::from_seconds(90);

        assert!(matches!(
            small.minus(big),
            Err(RaceError::InvalidDuration { .. })
        ));
        assert_eq!(small.checked_minus(big), None);
        assert_eq!(big.minus(small).unwrap().to_string(), "1m 0s");
        assert_eq!(big.minus(big).unwrap(), Duration::ZERO);
    }

    #[test]
    fn test_operators_and_sum() {
        let mut d = Duration::from_seconds(150) + Duration::from_seconds(105);
        assert_eq!(d.to_string(), "4m 15s");

        d += Duration::from_seconds(45);
        assert_eq!(d.to_string(), "5m 0s");

        let parts = vec![Duration::from_seconds(10), Duration::from_seconds(20)];
        let total: Duration = parts.iter().sum();
        assert_eq!(total, Duration::from_seconds(30));

        let none: Duration = Vec::<Duration>::new().into_iter().sum();
        assert!(none.is_zero());
    }

    #[test]
    fn test_parse_accepted_forms() {
        assert_eq!("2m 30s".parse::<Duration>().unwrap(), Duration::from_seconds(150));
        assert_eq!("3m0s".parse::<Duration>().unwrap(), Duration::from_seconds(180));
        assert_eq!("2:30".parse::<Duration>().unwrap(), Duration::from_seconds(150));
        assert_eq!(" 105 ".parse::<Duration>().unwrap(), Duration::from_seconds(105));
    }

    #[test]
    fn test_parse_pattern_is_compiled_once() {
        assert!(std::ptr::eq(duration_pattern(), duration_pattern()));
        for _ in 0..3 {
            assert_eq!("1m 5s".parse::<Duration>().unwrap(), Duration::from_seconds(65));
        }
    }

    #[test]
    fn test_parse_round_trips_display() {
        let d = Duration::from_seconds(3_725);
        assert_eq!(d.to_string().parse::<Duration>().unwrap(), d);
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        for input in ["", "abc", "2m 75s", "2:75", "-5", "2m", "1:5"] {
            let result = input.parse::<Duration>();
            assert!(
                matches!(result, Err(RaceError::InvalidDuration { .. })),
                "expected '{}' to be rejected",
                input
            );
        }
    }

    #[test]
    fn test_record_conversion() {
        let record = RaceRecord {
            participant_id: "participant1".to_string(),
            sport_type: "swim".to_string(),
            duration_seconds: 150,
        };
        let result = RaceResult::from(record.clone());

        assert_eq!(result.duration.to_string(), "2m 30s");
        assert!(result.matches("participant1", "swim"));
        assert!(!result.matches("participant1", "run"));
        assert_eq!(RaceRecord::from(&result), record);
    }

    #[test]
    fn test_record_uses_camel_case_fields() {
        let record = RaceRecord {
            participant_id: "p".to_string(),
            sport_type: "run".to_string(),
            duration_seconds: 42,
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"participantId": "p", "sportType": "run", "durationSeconds": 42})
        );
    }
}
