//! Error type shared by every conversion, locator and formatter in the crate.

use thiserror::Error;

use crate::calendar::Calendar;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, AxisError>;

/// Errors raised while configuring an axis or converting its values.
///
/// Nothing in the crate retries or suppresses these; they are returned to
/// the caller as soon as they are detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AxisError {
    // ---- Configuration ----
    /// The calendar identifier is not one of the supported calendars.
    #[error("unrecognised calendar {0:?}")]
    UnknownCalendar(String),

    /// The calendar identifier is empty.
    #[error("a calendar must be defined to plot dates on a calendar time axis")]
    MissingCalendar,

    /// A time unit does not read `"<scale> since <epoch>"`.
    #[error("invalid time unit {unit:?}: {reason}")]
    InvalidUnit { unit: String, reason: &'static str },

    /// A locator was given a unit that is not counted in days.
    #[error("the date unit must be days since for a calendar time locator, got {unit:?}")]
    NonDailyUnit { unit: String },

    /// The tick budget must allow at least one interval.
    #[error("max_n_ticks must be at least 1")]
    InvalidMaxTicks,

    /// Preferred sub-locator steps must increase strictly within `[1, 10]`.
    #[error("steps must be strictly increasing values within [1, 10], got {0:?}")]
    InvalidSteps(Vec<f64>),

    /// A format pattern uses a directive the renderer does not know.
    #[error("unsupported format directive {0:?}")]
    UnsupportedDirective(String),

    // ---- Heterogeneous input ----
    /// Values that must share one calendar do not.
    #[error("calendar units are not all equal: found {first} and {other}")]
    MixedCalendars { first: Calendar, other: Calendar },

    // ---- Type mismatch ----
    /// A value is not of the kind the operation expects.
    #[error("{0}")]
    TypeMismatch(&'static str),

    /// The operation needs at least one value.
    #[error("no values were supplied")]
    EmptyInput,

    // ---- Values ----
    /// The fields do not name a date that exists in the calendar.
    #[error("{year:04}-{month:02}-{day:02} is not a valid date in the {calendar} calendar")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        calendar: Calendar,
    },

    /// A time of day outside `00:00:00..=23:59:59.999999`.
    #[error("{hour:02}:{minute:02}:{second:02} is not a valid time of day")]
    InvalidTime { hour: u32, minute: u32, second: u32 },

    /// A numeric value is NaN, infinite or too far from the epoch.
    #[error("value {0} cannot be represented as a calendar date")]
    OutOfRange(f64),

    // ---- Internal consistency ----
    /// A resolution name that no generator handles.
    #[error("resolution {0:?} not implemented")]
    UnknownResolution(String),
}
