//! Tick location and tick labeling for calendar time axes.
//!
//! [`CalendarLocator`] picks tick positions for a view range and records the
//! [`Resolution`] it used; [`AutoFormatter`] renders those positions as
//! labels at that resolution. [`FixedFormatter`] renders every tick with one
//! pattern regardless of resolution.
//!
//! # Examples
//!
//! ```rust
//! use caltick::calendar::Calendar;
//! use caltick::ticker::{AutoFormatter, CalendarLocator, Resolution, TickFormatter};
//!
//! let locator = CalendarLocator::new(5, Calendar::NoLeap).unwrap();
//! let formatter = AutoFormatter::new(&locator);
//!
//! let ticks = locator.locate(0.0, 30.0).unwrap();
//! assert_eq!(ticks.resolution, Resolution::Daily);
//! assert_eq!(ticks.values, vec![0.0, 7.0, 14.0, 21.0, 28.0, 35.0]);
//! assert_eq!(formatter.format(7.0, Some(1)).unwrap(), "2000-01-08");
//! ```

mod formatter;
mod locator;
mod max_n;
mod util;

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

pub use formatter::{AutoFormatter, FixedFormatter};
pub use locator::{classify, CalendarLocator, Classification, DEFAULT_MAX_N_TICKS};
pub use max_n::MaxNLocator;
pub use util::{nonsingular, sorted_pair};

use crate::error::{AxisError, Result};

/// Granularity of a tick set, finest first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Resolution {
    Secondly,
    Minutely,
    Hourly,
    #[default]
    Daily,
    Monthly,
    Yearly,
}

impl Resolution {
    pub const ALL: [Resolution; 6] = [
        Resolution::Secondly,
        Resolution::Minutely,
        Resolution::Hourly,
        Resolution::Daily,
        Resolution::Monthly,
        Resolution::Yearly,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Resolution::Secondly => "SECONDLY",
            Resolution::Minutely => "MINUTELY",
            Resolution::Hourly => "HOURLY",
            Resolution::Daily => "DAILY",
            Resolution::Monthly => "MONTHLY",
            Resolution::Yearly => "YEARLY",
        }
    }

    /// Label pattern used by [`AutoFormatter`] at this resolution.
    pub fn pattern(self) -> &'static str {
        match self {
            Resolution::Secondly => "%H:%M:%S",
            Resolution::Minutely => "%H:%M",
            Resolution::Hourly => "%Y-%m-%d %H:%M",
            Resolution::Daily => "%Y-%m-%d",
            Resolution::Monthly => "%Y-%m",
            Resolution::Yearly => "%Y",
        }
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Resolution {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self> {
        Resolution::ALL
            .into_iter()
            .find(|r| r.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AxisError::UnknownResolution(s.to_string()))
    }
}

/// Tick positions together with the resolution they were generated at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickSet {
    pub resolution: Resolution,
    /// Axis numbers, strictly ascending.
    pub values: Vec<f64>,
}

impl TickSet {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Host contract for anything that places ticks on an axis.
pub trait Locator {
    /// Tick positions covering `[vmin, vmax]` in axis numbers.
    fn tick_values(&self, vmin: f64, vmax: f64) -> Result<Vec<f64>>;
}

/// Host contract for anything that labels ticks.
pub trait TickFormatter {
    /// Label for the tick at `value`; `pos` is its index when known.
    fn format(&self, value: f64, pos: Option<usize>) -> Result<String>;
}

/// Read-only view of the resolution a [`CalendarLocator`] last used.
#[derive(Clone, Debug)]
pub struct ResolutionHandle(Rc<Cell<Resolution>>);

impl ResolutionHandle {
    pub(crate) fn new(cell: Rc<Cell<Resolution>>) -> Self {
        Self(cell)
    }

    pub fn get(&self) -> Resolution {
        self.0.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order_and_default() {
        assert!(Resolution::Secondly < Resolution::Minutely);
        assert!(Resolution::Hourly < Resolution::Daily);
        assert!(Resolution::Monthly < Resolution::Yearly);
        assert_eq!(Resolution::default(), Resolution::Daily);
    }

    #[test]
    fn test_resolution_names_round_trip() {
        for r in Resolution::ALL {
            assert_eq!(r.to_string().parse::<Resolution>().unwrap(), r);
        }
        assert_eq!("yearly".parse::<Resolution>().unwrap(), Resolution::Yearly);
        assert_eq!(
            "WEEKLY".parse::<Resolution>(),
            Err(AxisError::UnknownResolution("WEEKLY".into()))
        );
    }

    #[test]
    fn test_pattern_table() {
        assert_eq!(Resolution::Secondly.pattern(), "%H:%M:%S");
        assert_eq!(Resolution::Hourly.pattern(), "%Y-%m-%d %H:%M");
        assert_eq!(Resolution::Yearly.pattern(), "%Y");
    }

    #[test]
    fn test_handle_follows_cell() {
        let cell = Rc::new(Cell::new(Resolution::Daily));
        let handle = ResolutionHandle::new(Rc::clone(&cell));
        cell.set(Resolution::Monthly);
        assert_eq!(handle.get(), Resolution::Monthly);
    }
}
