//! Calendar primitives used to timestamp ledger records.
//!
//! The calendar is deliberately flat: February always has 28 days and there is
//! no leap-year handling. Out-of-range components are clamped to a default
//! rather than rejected, both when constructing values directly and when
//! parsing persisted text.

use std::fmt;

use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;
const DEFAULT_YEAR: i32 = 2000;

/// Hour, minute and second of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TimeOfDay {
    /// Builds a time, replacing any out-of-range component with zero.
    pub fn new(hour: i32, minute: i32, second: i32) -> Self {
        Self {
            hour: clamp_or(hour, 0, 23, 0),
            minute: clamp_or(minute, 0, 59, 0),
            second: clamp_or(second, 0, 59, 0),
        }
    }

    pub fn midnight() -> Self {
        Self::default()
    }

    pub fn end_of_day() -> Self {
        Self::new(23, 59, 59)
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

/// A calendar date with a time of day.
///
/// Field order matters: the derived `Ord` compares year, month, day and then
/// the time, which is the lexicographic ordering the period reports rely on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CalendarDateTime {
    year: i32,
    month: u32,
    day: u32,
    time: TimeOfDay,
}

impl CalendarDateTime {
    /// Builds a timestamp, clamping invalid components to 2000, January and day 1.
    pub fn new(year: i32, month: i32, day: i32, time: TimeOfDay) -> Self {
        let max_day = max_day_for(month);
        Self {
            year: if (MIN_YEAR..=MAX_YEAR).contains(&year) {
                year
            } else {
                DEFAULT_YEAR
            },
            month: clamp_or(month, 1, 12, 1),
            day: clamp_or(day, 1, max_day as i32, 1),
            time,
        }
    }

    pub fn from_ymd(year: i32, month: i32, day: i32) -> Self {
        Self::new(year, month, day, TimeOfDay::midnight())
    }

    /// Best-effort parse of `YYYY-MM-DD HH:MM:SS`.
    ///
    /// Components are read in order, like a `%d-%d-%d %d:%d:%d` scan: the first
    /// component that cannot be read stops the scan and every remaining
    /// component keeps its default. Never fails.
    pub fn parse_lenient(text: &str) -> Self {
        let mut parts = [DEFAULT_YEAR, 1, 1, 0, 0, 0];
        let mut scanner = Scanner::new(text);
        let separators = [Some('-'), Some('-'), None, Some(':'), Some(':')];

        for (slot, value) in parts.iter_mut().enumerate() {
            match scanner.integer() {
                Some(parsed) => *value = parsed,
                None => break,
            }
            if let Some(separator) = separators.get(slot) {
                let matched = match separator {
                    Some(ch) => scanner.literal(*ch),
                    None => {
                        scanner.skip_whitespace();
                        true
                    }
                };
                if !matched {
                    break;
                }
            }
        }

        Self::new(
            parts[0],
            parts[1],
            parts[2],
            TimeOfDay::new(parts[3], parts[4], parts[5]),
        )
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }
}

impl Default for CalendarDateTime {
    fn default() -> Self {
        Self::from_ymd(DEFAULT_YEAR, 1, 1)
    }
}

impl fmt::Display for CalendarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {}",
            self.year, self.month, self.day, self.time
        )
    }
}

impl From<NaiveDateTime> for CalendarDateTime {
    fn from(value: NaiveDateTime) -> Self {
        Self::new(
            value.year(),
            value.month() as i32,
            value.day() as i32,
            TimeOfDay::new(
                value.hour() as i32,
                value.minute() as i32,
                value.second() as i32,
            ),
        )
    }
}

/// Days in `month` under the flat calendar. Unknown months get 31.
pub fn max_day_for(month: i32) -> u32 {
    match month {
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn clamp_or(value: i32, min: i32, max: i32, fallback: u32) -> u32 {
    if (min..=max).contains(&value) {
        value as u32
    } else {
        fallback
    }
}

/// Clock abstracts access to the current timestamp so the tracker stays deterministic in tests.
pub trait Clock {
    fn now(&self) -> CalendarDateTime;
}

/// Real-time clock backed by the local wall clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> CalendarDateTime {
        CalendarDateTime::from(Local::now().naive_local())
    }
}

/// Clock pinned to a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub CalendarDateTime);

impl Clock for FixedClock {
    fn now(&self) -> CalendarDateTime {
        self.0
    }
}

struct Scanner<'a> {
    rest: &'a str,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn integer(&mut self) -> Option<i32> {
        self.skip_whitespace();
        let bytes = self.rest.as_bytes();
        let mut end = 0;
        if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
            end = 1;
        }
        let digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end == digits_start {
            return None;
        }
        let value = self.rest[..end].parse::<i64>().ok()?;
        self.rest = &self.rest[end..];
        Some(value.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }

    fn literal(&mut self, expected: char) -> bool {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }
}
