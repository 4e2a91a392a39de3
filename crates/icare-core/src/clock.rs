//! Time source and shift derivation.
//!
//! The session never reads the wall clock directly; it asks a [`Clock`] so
//! tests can pin "today" and "now".

use chrono::{Local, NaiveDate, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three fixed duty periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    /// 07:00 - 15:00
    Morning,
    /// 15:00 - 23:00
    Afternoon,
    /// 23:00 - 07:00
    Night,
}

impl Shift {
    /// Buckets an hour of the day (0-23) into its shift.
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            7..=14 => Shift::Morning,
            15..=22 => Shift::Afternoon,
            _ => Shift::Night,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Shift::Morning => "morning",
            Shift::Afternoon => "afternoon",
            Shift::Night => "night",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "morning" => Some(Shift::Morning),
            "afternoon" => Some(Shift::Afternoon),
            "night" => Some(Shift::Night),
            _ => None,
        }
    }

    /// Label with the duty hours, used in report headers.
    pub fn label(self) -> &'static str {
        match self {
            Shift::Morning => "早班 (7:00-15:00)",
            Shift::Afternoon => "中班 (15:00-23:00)",
            Shift::Night => "夜班 (23:00-7:00)",
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Shift::Morning => "早班",
            Shift::Afternoon => "中班",
            Shift::Night => "夜班",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of the current local date and time.
pub trait Clock {
    fn now(&self) -> NaiveDateTime;

    fn today(&self) -> NaiveDate {
        self.now().date()
    }

    /// Wall-clock time formatted as `HH:MM`.
    fn time_str(&self) -> String {
        self.now().format("%H:%M").to_string()
    }

    fn current_shift(&self) -> Shift {
        Shift::from_hour(self.now().hour())
    }
}

/// Clock backed by the host's local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl FixedClock {
    /// Builds a clock from date and time components.
    ///
    /// Returns `None` when the components do not form a valid instant.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|date| date.and_hms_opt(hour, minute, 0))
            .map(FixedClock)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shift_boundaries() {
        assert_eq!(Shift::from_hour(6), Shift::Night);
        assert_eq!(Shift::from_hour(7), Shift::Morning);
        assert_eq!(Shift::from_hour(14), Shift::Morning);
        assert_eq!(Shift::from_hour(15), Shift::Afternoon);
        assert_eq!(Shift::from_hour(22), Shift::Afternoon);
        assert_eq!(Shift::from_hour(23), Shift::Night);
        assert_eq!(Shift::from_hour(0), Shift::Night);
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::at(2026, 2, 22, 9, 5).unwrap();
        assert_eq!(clock.today().to_string(), "2026-02-22");
        assert_eq!(clock.time_str(), "09:05");
        assert_eq!(clock.current_shift(), Shift::Morning);
    }

    #[test]
    fn test_shift_parse_round_trip() {
        for shift in [Shift::Morning, Shift::Afternoon, Shift::Night] {
            assert_eq!(Shift::parse(shift.as_str()), Some(shift));
        }
        assert_eq!(Shift::parse("evening"), None);
    }
}
