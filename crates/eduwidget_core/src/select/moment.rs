//! Wall-clock snapshot used by time-dependent selectors.

use chrono::{Datelike, Local, NaiveDate, NaiveTime, Timelike};

/// A captured local date plus minute-of-day.
///
/// Selectors take a `Moment` instead of reading the clock themselves, so
/// a computation sees one consistent "now" and tests can pin it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Moment {
    date: NaiveDate,
    minutes: u32,
}

impl Moment {
    /// Captures the device-local clock.
    pub fn now() -> Self {
        let now = Local::now();
        Self::new(now.date_naive(), now.time())
    }

    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            minutes: time.hour() * 60 + time.minute(),
        }
    }

    /// Timetable day index, Monday=0 ... Sunday=6.
    ///
    /// The native weekday numbering is Sunday-first (Sun=0 ... Sat=6);
    /// schedule items use Monday-first, so Sun(0)->6, Mon(1)->0, ...,
    /// Sat(6)->5.
    pub fn day_index(&self) -> u8 {
        let native = self.date.weekday().num_days_from_sunday();
        ((native + 6) % 7) as u8
    }

    /// Local date in `YYYY-MM-DD` form, for due-date comparison.
    pub fn today_iso(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    pub fn minutes_since_midnight(&self) -> u32 {
        self.minutes
    }
}

/// Parses `HH:MM` into minutes since midnight.
///
/// Tolerant like the rest of the read path: a missing or non-numeric part
/// counts as 0, so "9" is 09:00 and garbage is midnight.
pub fn minutes_from_hhmm(value: &str) -> u32 {
    let mut parts = value.splitn(2, ':');
    let hours = parts
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok())
        .unwrap_or(0);
    let minutes = parts
        .next()
        .and_then(|part| part.trim().parse::<u32>().ok())
        .unwrap_or(0);
    hours * 60 + minutes
}
