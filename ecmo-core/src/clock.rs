//! Wall-clock time of capture.

use std::fmt;

use chrono::{Local, NaiveTime, Timelike};

/// Time of day at which an observation was captured.
///
/// Truncated to the second and displayed as `HH:MM:SS`. There is no date
/// component: the dashboard only lives for one bedside session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Build a time from hours, minutes and seconds.
    ///
    /// Returns `None` if any component is out of range.
    pub fn from_hms(hour: u32, minute: u32, second: u32) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, second).map(Self)
    }

    /// Truncate an arbitrary time of day to whole seconds.
    pub fn truncate(time: NaiveTime) -> Self {
        Self(time.with_nanosecond(0).unwrap_or(time))
    }

    /// The same time shifted forward, wrapping at midnight.
    pub fn plus_seconds(&self, seconds: i64) -> Self {
        let (time, _) = self.0.overflowing_add_signed(chrono::Duration::seconds(seconds));
        Self(time)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%H:%M:%S"))
    }
}

/// Source of capture timestamps for the append operation.
pub trait Clock {
    /// Current wall-clock time of day.
    fn now(&self) -> ClockTime;
}

/// Local wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> ClockTime {
        ClockTime::truncate(Local::now().time())
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Clone)]
pub struct FixedClock {
    time: ClockTime,
}

impl FixedClock {
    pub fn new(time: ClockTime) -> Self {
        Self { time }
    }

    pub fn set(&mut self, time: ClockTime) {
        self.time = time;
    }

    /// Move the clock forward by `seconds`.
    pub fn advance(&mut self, seconds: i64) {
        self.time = self.time.plus_seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> ClockTime {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_zero_padded() {
        let t = ClockTime::from_hms(7, 5, 9).unwrap();
        assert_eq!(t.to_string(), "07:05:09");
    }

    #[test]
    fn test_truncate_drops_subseconds() {
        let raw = NaiveTime::from_hms_milli_opt(23, 59, 58, 999).unwrap();
        let t = ClockTime::truncate(raw);
        assert_eq!(t, ClockTime::from_hms(23, 59, 58).unwrap());
        assert_eq!(t.to_string(), "23:59:58");
    }

    #[test]
    fn test_from_hms_rejects_invalid() {
        assert!(ClockTime::from_hms(24, 0, 0).is_none());
        assert!(ClockTime::from_hms(12, 60, 0).is_none());
    }

    #[test]
    fn test_fixed_clock_advance_wraps_midnight() {
        let mut clock = FixedClock::new(ClockTime::from_hms(23, 59, 59).unwrap());
        clock.advance(2);
        assert_eq!(clock.now().to_string(), "00:00:01");
    }

    #[test]
    fn test_system_clock_has_whole_seconds() {
        let now = SystemClock.now();
        assert_eq!(now.to_string().len(), 8);
    }
}
