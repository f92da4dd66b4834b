use std::fmt::{self, Write as _};

use super::{Calendar, MICROS_PER_DAY};
use crate::error::{AxisError, Result};

/// A date and time of day under a named calendar.
///
/// Fields are validated against the calendar on construction, so a
/// `CalendarDate` obtained from the public constructors always names a day
/// that exists in its calendar.
///
/// # Examples
///
/// ```rust
/// use caltick::calendar::{Calendar, CalendarDate};
///
/// let date = CalendarDate::new(Calendar::Day360, 2001, 2, 30)
///     .and_then(|d| d.and_hms(6, 30, 0))
///     .unwrap();
/// assert_eq!(date.format("%Y-%m-%d %H:%M").unwrap(), "2001-02-30 06:30");
///
/// // February 30th does not exist in the no-leap calendar.
/// assert!(CalendarDate::new(Calendar::NoLeap, 2001, 2, 30).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    microsecond: u32,
    calendar: Calendar,
}

impl CalendarDate {
    /// Midnight at the start of `year-month-day`.
    pub fn new(calendar: Calendar, year: i32, month: u32, day: u32) -> Result<Self> {
        calendar.validate(year, month, day)?;
        Ok(Self::unchecked(calendar, year, month, day))
    }

    /// Same day at `hour:minute:second`.
    pub fn and_hms(self, hour: u32, minute: u32, second: u32) -> Result<Self> {
        if hour >= 24 || minute >= 60 || second >= 60 {
            return Err(AxisError::InvalidTime {
                hour,
                minute,
                second,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            ..self
        })
    }

    /// Same instant with the sub-second part replaced.
    pub fn with_microsecond(self, microsecond: u32) -> Result<Self> {
        if microsecond >= 1_000_000 {
            return Err(AxisError::InvalidTime {
                hour: self.hour,
                minute: self.minute,
                second: self.second,
            });
        }
        Ok(Self {
            microsecond,
            ..self
        })
    }

    /// Builds the first instant of a day without checking that it exists.
    ///
    /// Tick synthesis uses this for round dates such as year 0 in a
    /// real-world calendar; such dates are dropped before conversion, and
    /// [`CalendarDate::day_number`] rejects them if they are not.
    pub(crate) fn unchecked(calendar: Calendar, year: i32, month: u32, day: u32) -> Self {
        Self {
            year,
            month,
            day,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            calendar,
        }
    }

    pub(crate) fn from_day_number(calendar: Calendar, day_number: i64, micros_of_day: i64) -> Self {
        let (year, month, day) = calendar.ymd_from_day_number(day_number);
        let total_seconds = micros_of_day / 1_000_000;
        Self {
            year,
            month,
            day,
            hour: (total_seconds / 3600) as u32,
            minute: (total_seconds / 60 % 60) as u32,
            second: (total_seconds % 60) as u32,
            microsecond: (micros_of_day % 1_000_000) as u32,
            calendar,
        }
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

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }

    pub fn second(&self) -> u32 {
        self.second
    }

    pub fn microsecond(&self) -> u32 {
        self.microsecond
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Continuous day count of the date (see [`Calendar`] for the origin).
    pub(crate) fn day_number(&self) -> Result<i64> {
        self.calendar.day_number(self.year, self.month, self.day)
    }

    pub(crate) fn micros_of_day(&self) -> i64 {
        let seconds = (self.hour * 3600 + self.minute * 60 + self.second) as i64;
        debug_assert!(seconds * 1_000_000 < MICROS_PER_DAY);
        seconds * 1_000_000 + self.microsecond as i64
    }

    /// 1-based day of the year.
    pub fn ordinal(&self) -> u32 {
        let before: u32 = (1..self.month)
            .map(|m| self.calendar.days_in_month(self.year, m))
            .sum();
        let skipped = if self.calendar == Calendar::Standard
            && self.year == 1582
            && (self.month > 10 || (self.month == 10 && self.day > 14))
        {
            10
        } else {
            0
        };
        before + self.day - skipped
    }

    /// Renders the date with a `strftime`-style pattern.
    ///
    /// Supported directives: `%Y` (year, at least four digits), `%y`
    /// (two-digit year), `%m`, `%d`, `%j` (day of year), `%H`, `%M`, `%S`,
    /// `%f` (microseconds) and `%%`.
    pub fn format(&self, pattern: &str) -> Result<String> {
        let mut out = String::with_capacity(pattern.len() + 8);
        let mut chars = pattern.chars();
        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            // Writing into a String never fails.
            let _ = match chars.next() {
                Some('Y') => write!(out, "{:04}", self.year),
                Some('y') => write!(out, "{:02}", self.year.rem_euclid(100)),
                Some('m') => write!(out, "{:02}", self.month),
                Some('d') => write!(out, "{:02}", self.day),
                Some('j') => write!(out, "{:03}", self.ordinal()),
                Some('H') => write!(out, "{:02}", self.hour),
                Some('M') => write!(out, "{:02}", self.minute),
                Some('S') => write!(out, "{:02}", self.second),
                Some('f') => write!(out, "{:06}", self.microsecond),
                Some('%') => write!(out, "%"),
                Some(other) => return Err(AxisError::UnsupportedDirective(format!("%{other}"))),
                None => return Err(AxisError::UnsupportedDirective("%".into())),
            };
        }
        Ok(out)
    }
}

/// Fails when `pattern` uses a directive [`CalendarDate::format`] cannot render.
pub(crate) fn validate_pattern(pattern: &str) -> Result<()> {
    CalendarDate::unchecked(Calendar::Day360, 2000, 1, 1)
        .format(pattern)
        .map(|_| ())
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.microsecond != 0 {
            write!(f, ".{:06}", self.microsecond)?;
        }
        Ok(())
    }
}
