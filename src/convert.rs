//! Conversion of plotted values to axis numbers, and the default setup of a
//! calendar time axis.
//!
//! A host hands plotted values to [`CalendarConverter`] as [`Shaped`]
//! collections of [`Datum`]. Calendar dates become numbers counted in
//! [`AXIS_UNIT`]; values that are already numbers pass through. Output
//! keeps the input's shape.
//!
//! # Examples
//!
//! ```rust
//! use caltick::calendar::{Calendar, CalendarDate};
//! use caltick::convert::{CalendarConverter, Datum};
//! use caltick::Shaped;
//!
//! let date = CalendarDate::new(Calendar::Day360, 2012, 6, 4).unwrap();
//! let values = Shaped::Sequence(vec![Datum::Date(date)]);
//!
//! let units = CalendarConverter::default_units(&values).unwrap();
//! assert_eq!(units.calendar, Calendar::Day360);
//!
//! let numbers = CalendarConverter::convert(values).unwrap();
//! assert_eq!(numbers, Shaped::Sequence(vec![4473.0]));
//!
//! let info = CalendarConverter::axis_info(&units).unwrap();
//! assert_eq!(info.default_view().unwrap(), (0.0, 3600.0));
//! ```

use crate::calendar::{Calendar, CalendarDate, TimeUnit, AXIS_UNIT};
use crate::error::{AxisError, Result};
use crate::shaped::Shaped;
use crate::ticker::{AutoFormatter, CalendarLocator, DEFAULT_MAX_N_TICKS};

/// One plotted value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Datum {
    /// Already an axis number.
    Number(f64),
    Date(CalendarDate),
}

impl Datum {
    pub fn as_date(&self) -> Option<&CalendarDate> {
        match self {
            Datum::Date(date) => Some(date),
            Datum::Number(_) => None,
        }
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Number(value)
    }
}

impl From<CalendarDate> for Datum {
    fn from(date: CalendarDate) -> Self {
        Datum::Date(date)
    }
}

/// Units of a calendar time axis: its calendar and [`AXIS_UNIT`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AxisUnits {
    pub calendar: Calendar,
    pub unit: TimeUnit,
}

impl AxisUnits {
    pub fn new(calendar: Calendar) -> Self {
        Self {
            calendar,
            unit: TimeUnit::axis(),
        }
    }
}

/// Locator, formatter and default view for a fresh axis.
#[derive(Debug)]
pub struct AxisInfo {
    pub locator: CalendarLocator,
    pub formatter: AutoFormatter,
    /// View shown before any data is plotted.
    pub default_limits: (CalendarDate, CalendarDate),
}

impl AxisInfo {
    /// [`AxisInfo::default_limits`] as axis numbers.
    pub fn default_view(&self) -> Result<(f64, f64)> {
        let unit = TimeUnit::axis();
        let (start, end) = &self.default_limits;
        Ok((unit.to_numeric(start)?, unit.to_numeric(end)?))
    }
}

/// Converts plotted values for a calendar time axis.
#[derive(Clone, Copy, Debug, Default)]
pub struct CalendarConverter;

impl CalendarConverter {
    /// Axis units for `values`, which must be calendar dates on one calendar.
    pub fn default_units(values: &Shaped<Datum>) -> Result<AxisUnits> {
        let calendar = common_calendar(values)?;
        tracing::debug!(%calendar, unit = AXIS_UNIT, "calendar axis units");
        Ok(AxisUnits::new(calendar))
    }

    /// Axis numbers for `values`, in the same shape.
    ///
    /// Numbers pass through untouched. Dates must share one calendar and
    /// are counted in [`AXIS_UNIT`]. Mixing numbers and dates is an error.
    pub fn convert(values: Shaped<Datum>) -> Result<Shaped<f64>> {
        let mixed = || AxisError::TypeMismatch("numbers and calendar dates cannot be mixed");
        if !matches!(values.first(), Some(Datum::Date(_))) {
            return values.try_map(|datum| match datum {
                Datum::Number(value) => Ok(value),
                Datum::Date(_) => Err(mixed()),
            });
        }
        let calendar = common_calendar(&values)?;
        tracing::trace!(%calendar, count = values.len(), "converting calendar dates");
        let unit = TimeUnit::axis();
        values.try_map(|datum| match datum {
            Datum::Date(date) => unit.to_numeric(&date),
            Datum::Number(_) => Err(mixed()),
        })
    }

    /// Default locator, formatter and limits for an axis in `units`.
    pub fn axis_info(units: &AxisUnits) -> Result<AxisInfo> {
        let locator = CalendarLocator::new(DEFAULT_MAX_N_TICKS, units.calendar)?;
        let formatter = AutoFormatter::new(&locator);
        let default_limits = (
            CalendarDate::new(units.calendar, 2000, 1, 1)?,
            CalendarDate::new(units.calendar, 2010, 1, 1)?,
        );
        Ok(AxisInfo {
            locator,
            formatter,
            default_limits,
        })
    }
}

/// The one calendar shared by every value, all of which must be dates.
fn common_calendar(values: &Shaped<Datum>) -> Result<Calendar> {
    let mut dates = values.iter().map(|datum| {
        datum.as_date().map(CalendarDate::calendar).ok_or(AxisError::TypeMismatch(
            "expecting calendar dates with a calendar",
        ))
    });
    let first = dates.next().ok_or(AxisError::EmptyInput)??;
    for calendar in dates {
        let other = calendar?;
        if other != first {
            return Err(AxisError::MixedCalendars { first, other });
        }
    }
    Ok(first)
}
