//! Wall-clock access and hour classification.
//!
//! Every query reads the clock again; nothing here caches the current hour.

use crate::config::HourRange;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;
use std::{fmt, sync::Arc};

pub trait Clock: Send + Sync {
    /// Local wall-clock time.
    fn now(&self) -> NaiveDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Calendar day identifier, `YYYY-MM-DD`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayKey(String);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeState {
    Past,
    Present,
    Future,
}

impl TimeState {
    pub fn css_class(self) -> &'static str {
        match self {
            TimeState::Past => "block-past",
            TimeState::Present => "block-present",
            TimeState::Future => "block-future",
        }
    }
}

/// Position of the now-indicator: the current hour and how far into it we are.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NowOffset {
    pub hour: u8,
    pub fraction: f64,
}

pub fn classify_hour(hour: u8, current_hour: u8) -> TimeState {
    if hour < current_hour {
        TimeState::Past
    } else if hour == current_hour {
        TimeState::Present
    } else {
        TimeState::Future
    }
}

#[derive(Clone)]
pub struct TimeOracle {
    clock: Arc<dyn Clock>,
    range: HourRange,
}

impl TimeOracle {
    pub fn new(clock: Arc<dyn Clock>, range: HourRange) -> Self {
        Self { clock, range }
    }

    pub fn system(range: HourRange) -> Self {
        Self::new(Arc::new(SystemClock), range)
    }

    pub fn range(&self) -> HourRange {
        self.range
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    pub fn current_day_key(&self) -> DayKey {
        DayKey::from_date(self.today())
    }

    pub fn current_hour(&self) -> u8 {
        self.clock.now().hour() as u8
    }

    pub fn classify(&self, hour: u8) -> TimeState {
        classify_hour(hour, self.current_hour())
    }

    /// `None` outside the configured range, where the indicator is hidden.
    pub fn now_offset(&self) -> Option<NowOffset> {
        let now = self.clock.now();
        let hour = now.hour() as u8;
        if !self.range.contains(hour) {
            return None;
        }
        Some(NowOffset {
            hour,
            fraction: f64::from(now.minute()) / 60.0,
        })
    }

    /// Hour to bring into view on load. Nothing before the day starts;
    /// after it ends, the last block.
    pub fn focus_hour(&self) -> Option<u8> {
        let hour = self.current_hour();
        if hour < self.range.start() {
            return None;
        }
        Some(hour.min(self.range.end()))
    }

    pub fn header_date(&self) -> String {
        self.today().format("%A, %B %-d, %Y").to_string()
    }
}

pub fn hour_label(hour: u8) -> String {
    NaiveTime::from_hms_opt(u32::from(hour), 0, 0)
        .map(|time| time.format("%-I:%M %p").to_string())
        .unwrap_or_else(|| format!("{hour}:00"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oracle_at(y: i32, m: u32, d: u32, h: u32, min: u32) -> TimeOracle {
        let at = NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap();
        TimeOracle::new(Arc::new(FixedClock(at)), HourRange::default())
    }

    #[test]
    fn classify_around_current_hour() {
        let oracle = oracle_at(2026, 10, 16, 14, 5);
        assert_eq!(oracle.classify(13), TimeState::Past);
        assert_eq!(oracle.classify(14), TimeState::Present);
        assert_eq!(oracle.classify(15), TimeState::Future);
        assert_eq!(oracle.classify(9), TimeState::Past);
        assert_eq!(oracle.classify(17), TimeState::Future);
    }

    #[test]
    fn classify_is_pure_in_hour_and_current_hour() {
        for current in 0..24u8 {
            for hour in 0..24u8 {
                let expected = match hour.cmp(&current) {
                    std::cmp::Ordering::Less => TimeState::Past,
                    std::cmp::Ordering::Equal => TimeState::Present,
                    std::cmp::Ordering::Greater => TimeState::Future,
                };
                assert_eq!(classify_hour(hour, current), expected);
            }
        }
    }

    #[test]
    fn day_key_is_zero_padded() {
        let oracle = oracle_at(2026, 3, 7, 10, 0);
        assert_eq!(oracle.current_day_key().as_str(), "2026-03-07");
    }

    #[test]
    fn day_key_stable_within_day_and_distinct_across_days() {
        let morning = oracle_at(2026, 10, 16, 0, 0).current_day_key();
        let night = oracle_at(2026, 10, 16, 23, 59).current_day_key();
        let next = oracle_at(2026, 10, 17, 0, 0).current_day_key();
        assert_eq!(morning, night);
        assert_ne!(night, next);

        let oracle = oracle_at(2026, 10, 16, 12, 0);
        assert_eq!(oracle.current_day_key(), oracle.current_day_key());
    }

    #[test]
    fn now_offset_inside_range() {
        let offset = oracle_at(2026, 10, 16, 14, 30).now_offset().unwrap();
        assert_eq!(offset.hour, 14);
        assert!((offset.fraction - 0.5).abs() < f64::EPSILON);

        let edge = oracle_at(2026, 10, 16, 17, 59).now_offset().unwrap();
        assert_eq!(edge.hour, 17);
        assert!(edge.fraction < 1.0);
    }

    #[test]
    fn now_offset_hidden_outside_range() {
        assert!(oracle_at(2026, 10, 16, 8, 59).now_offset().is_none());
        assert!(oracle_at(2026, 10, 16, 18, 0).now_offset().is_none());
    }

    #[test]
    fn focus_hour_clamps_to_range_end() {
        assert_eq!(oracle_at(2026, 10, 16, 7, 0).focus_hour(), None);
        assert_eq!(oracle_at(2026, 10, 16, 11, 0).focus_hour(), Some(11));
        assert_eq!(oracle_at(2026, 10, 16, 21, 0).focus_hour(), Some(17));
    }

    #[test]
    fn labels() {
        assert_eq!(hour_label(9), "9:00 AM");
        assert_eq!(hour_label(12), "12:00 PM");
        assert_eq!(hour_label(17), "5:00 PM");
        assert_eq!(oracle_at(2026, 10, 16, 9, 0).header_date(), "Friday, October 16, 2026");
    }
}
