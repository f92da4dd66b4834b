use std::fmt;
use std::str::FromStr;

use super::{Calendar, CalendarDate, MICROS_PER_DAY};
use crate::error::{AxisError, Result};

/// The fixed unit of every number that reaches the axis.
pub const AXIS_UNIT: &str = "days since 2000-01-01";

// Offsets beyond this many microseconds (about 126 000 years) are rejected
// before the float-to-integer conversion.
const MAX_OFFSET_MICROS: f64 = 4.0e18;

/// Length of one step of a [`TimeUnit`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnitScale {
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
}

impl UnitScale {
    /// Length of one unit in microseconds.
    pub const fn micros(self) -> i64 {
        match self {
            UnitScale::Days => MICROS_PER_DAY,
            UnitScale::Hours => 3_600_000_000,
            UnitScale::Minutes => 60_000_000,
            UnitScale::Seconds => 1_000_000,
            UnitScale::Milliseconds => 1_000,
            UnitScale::Microseconds => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UnitScale::Days => "days",
            UnitScale::Hours => "hours",
            UnitScale::Minutes => "minutes",
            UnitScale::Seconds => "seconds",
            UnitScale::Milliseconds => "milliseconds",
            UnitScale::Microseconds => "microseconds",
        }
    }

    fn from_word(word: &str) -> Option<Self> {
        match word {
            "days" | "day" | "d" => Some(UnitScale::Days),
            "hours" | "hour" | "hrs" | "hr" | "h" => Some(UnitScale::Hours),
            "minutes" | "minute" | "mins" | "min" => Some(UnitScale::Minutes),
            "seconds" | "second" | "secs" | "sec" | "s" => Some(UnitScale::Seconds),
            "milliseconds" | "millisecond" | "msecs" | "msec" | "ms" => {
                Some(UnitScale::Milliseconds)
            }
            "microseconds" | "microsecond" | "usecs" | "usec" | "us" => {
                Some(UnitScale::Microseconds)
            }
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct Epoch {
    year: i32,
    month: u32,
    day: u32,
    micros_of_day: i64,
}

/// A parsed `"<scale> since <epoch>"` unit string.
///
/// The epoch is only checked against a calendar when a conversion runs,
/// since `"days since 2000-02-30"` is valid in a 360-day calendar and
/// nowhere else.
///
/// # Examples
///
/// ```rust
/// use caltick::calendar::{Calendar, TimeUnit, UnitScale};
///
/// let unit: TimeUnit = "hours since 2000-01-01 06:00".parse().unwrap();
/// assert_eq!(unit.scale(), UnitScale::Hours);
///
/// let date = unit.to_date(18.0, Calendar::NoLeap).unwrap();
/// assert_eq!((date.day(), date.hour()), (2, 0));
/// assert_eq!(unit.to_numeric(&date).unwrap(), 18.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeUnit {
    scale: UnitScale,
    epoch: Epoch,
}

impl TimeUnit {
    /// `scale` since midnight at the start of `year-month-day`.
    pub fn new(scale: UnitScale, year: i32, month: u32, day: u32) -> Self {
        Self {
            scale,
            epoch: Epoch {
                year,
                month,
                day,
                micros_of_day: 0,
            },
        }
    }

    /// The axis unit, [`AXIS_UNIT`].
    pub fn axis() -> Self {
        Self::new(UnitScale::Days, 2000, 1, 1)
    }

    pub fn scale(&self) -> UnitScale {
        self.scale
    }

    pub fn is_daily(&self) -> bool {
        self.scale == UnitScale::Days
    }

    /// The same epoch counted in another scale.
    pub fn with_scale(&self, scale: UnitScale) -> Self {
        Self { scale, ..*self }
    }

    /// Converts a count of this unit to a date, rounded to the microsecond.
    pub fn to_date(&self, value: f64, calendar: Calendar) -> Result<CalendarDate> {
        if !value.is_finite() {
            return Err(AxisError::OutOfRange(value));
        }
        let offset = value * self.scale.micros() as f64;
        if offset.abs() > MAX_OFFSET_MICROS {
            return Err(AxisError::OutOfRange(value));
        }
        let total = self
            .epoch_micros(calendar)?
            .checked_add(offset.round() as i64)
            .ok_or(AxisError::OutOfRange(value))?;
        Ok(CalendarDate::from_day_number(
            calendar,
            total.div_euclid(MICROS_PER_DAY),
            total.rem_euclid(MICROS_PER_DAY),
        ))
    }

    /// Converts a date to a count of this unit in the date's own calendar.
    pub fn to_numeric(&self, date: &CalendarDate) -> Result<f64> {
        let origin = self.epoch_micros(date.calendar())?;
        let instant = date
            .day_number()?
            .checked_mul(MICROS_PER_DAY)
            .and_then(|m| m.checked_add(date.micros_of_day()))
            .ok_or(AxisError::InvalidDate {
                year: date.year(),
                month: date.month(),
                day: date.day(),
                calendar: date.calendar(),
            })?;
        Ok((instant - origin) as f64 / self.scale.micros() as f64)
    }

    fn epoch_micros(&self, calendar: Calendar) -> Result<i64> {
        let day = calendar.day_number(self.epoch.year, self.epoch.month, self.epoch.day)?;
        day.checked_mul(MICROS_PER_DAY)
            .and_then(|m| m.checked_add(self.epoch.micros_of_day))
            .ok_or_else(|| AxisError::InvalidUnit {
                unit: self.to_string(),
                reason: "epoch is too far from year zero",
            })
    }
}

impl Default for TimeUnit {
    fn default() -> Self {
        Self::axis()
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.epoch;
        write!(
            f,
            "{} since {:04}-{:02}-{:02}",
            self.scale.name(),
            e.year,
            e.month,
            e.day
        )?;
        if e.micros_of_day != 0 {
            let seconds = e.micros_of_day / 1_000_000;
            write!(
                f,
                " {:02}:{:02}:{:02}",
                seconds / 3600,
                seconds / 60 % 60,
                seconds % 60
            )?;
            let micros = e.micros_of_day % 1_000_000;
            if micros != 0 {
                write!(f, ".{micros:06}")?;
            }
        }
        Ok(())
    }
}

impl FromStr for TimeUnit {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason| AxisError::InvalidUnit {
            unit: s.to_string(),
            reason,
        };

        let lowered = s.trim().to_ascii_lowercase();
        let (scale_word, epoch_text) = lowered
            .split_once(" since ")
            .ok_or_else(|| invalid("expected \"<scale> since <epoch>\""))?;
        let scale =
            UnitScale::from_word(scale_word.trim()).ok_or_else(|| invalid("unknown time scale"))?;

        let epoch_text = epoch_text.trim();
        let epoch_text = epoch_text
            .strip_suffix("utc")
            .or_else(|| epoch_text.strip_suffix('z'))
            .unwrap_or(epoch_text)
            .trim_end();
        let (date_text, time_text) = match epoch_text.split_once(|c: char| c == ' ' || c == 't') {
            Some((date, time)) => (date, Some(time.trim())),
            None => (epoch_text, None),
        };

        let (year, month, day) =
            parse_epoch_date(date_text).ok_or_else(|| invalid("malformed epoch date"))?;
        let micros_of_day = match time_text {
            Some(text) if !text.is_empty() => {
                parse_epoch_time(text).ok_or_else(|| invalid("malformed epoch time"))?
            }
            _ => 0,
        };

        Ok(Self {
            scale,
            epoch: Epoch {
                year,
                month,
                day,
                micros_of_day,
            },
        })
    }
}

fn parse_epoch_date(text: &str) -> Option<(i32, u32, u32)> {
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut parts = body.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u32 = parts.next()?.parse().ok()?;
    let day: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some((if negative { -year } else { year }, month, day))
}

fn parse_epoch_time(text: &str) -> Option<i64> {
    let mut parts = text.split(':');
    let hour: i64 = parts.next()?.parse().ok()?;
    let minute: i64 = parts.next()?.parse().ok()?;
    let (second, micros) = match parts.next() {
        Some(sec) => match sec.split_once('.') {
            Some((whole, frac)) => (whole.parse().ok()?, parse_fraction(frac)?),
            None => (sec.parse().ok()?, 0),
        },
        None => (0, 0),
    };
    if parts.next().is_some() || hour >= 24 || minute >= 60 || second >= 60 {
        return None;
    }
    Some(((hour * 60 + minute) * 60 + second) * 1_000_000 + micros)
}

fn parse_fraction(frac: &str) -> Option<i64> {
    if frac.is_empty() || frac.len() > 6 || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits: i64 = frac.parse().ok()?;
    Some(digits * 10i64.pow(6 - frac.len() as u32))
}
