//! Calendar time axis ticking
//!
//! `caltick` places and labels ticks on a chart axis whose values are points
//! in time under a climate-model or historical calendar: 360-day, no-leap,
//! all-leap, Julian, proleptic Gregorian, or the mixed Julian/Gregorian
//! `standard` calendar. It does not draw anything; a host charting layer asks
//! it where the ticks go and what they say.
//!
//! # Core Concepts
//!
//! ## Axis numbers
//!
//! Every value on the axis is a real number of days since 2000-01-01 in the
//! axis calendar ([`calendar::AXIS_UNIT`]). The [`calendar`] module converts
//! between those numbers and [`CalendarDate`]s.
//!
//! ## Resolution
//!
//! The width of the view range picks a [`Resolution`], from `Secondly` up to
//! `Yearly`. Ticks fall on round boundaries of that unit, and labels show
//! only the fields that matter at that unit.
//!
//! ## Locators and formatters
//!
//! - [`CalendarLocator`] - tick positions for a view range
//! - [`AutoFormatter`] - labels at the resolution the locator last used
//! - [`FixedFormatter`] - labels with one fixed pattern
//!
//! The [`CalendarConverter`] turns plotted dates into axis numbers and
//! supplies a default locator, formatter and view for a fresh axis.
//!
//! # Examples
//!
//! ## Ticks and labels
//!
//! ```rust
//! use caltick::{AutoFormatter, Calendar, CalendarLocator, Resolution};
//!
//! let locator = CalendarLocator::new(4, Calendar::NoLeap).unwrap();
//! let formatter = AutoFormatter::new(&locator);
//!
//! let ticks = locator.locate(0.0, 365.0).unwrap();
//! assert_eq!(ticks.resolution, Resolution::Monthly);
//! assert_eq!(
//!     formatter.format_ticks(&ticks).unwrap(),
//!     vec!["2000-02", "2000-05", "2000-08", "2000-11", "2001-02"]
//! );
//! ```
//!
//! ## Converting dates
//!
//! ```rust
//! use caltick::convert::{CalendarConverter, Datum};
//! use caltick::{Calendar, CalendarDate, Shaped};
//!
//! let date = CalendarDate::new(Calendar::NoLeap, 2014, 8, 12).unwrap();
//! let numbers = CalendarConverter::convert(Shaped::Scalar(Datum::Date(date))).unwrap();
//! assert_eq!(numbers, Shaped::Scalar(5333.0));
//! ```
//!
//! ## Calendars without a year zero
//!
//! ```rust
//! use caltick::{Calendar, CalendarDate};
//!
//! assert!(CalendarDate::new(Calendar::Julian, 0, 1, 1).is_err());
//! assert!(CalendarDate::new(Calendar::Day360, 0, 1, 1).is_ok());
//! ```
//!

pub mod calendar;
pub mod convert;
pub mod error;
mod shaped;
pub mod ticker;

pub use calendar::{Calendar, CalendarDate, TimeUnit};
pub use convert::CalendarConverter;
pub use error::{AxisError, Result};
pub use shaped::Shaped;
pub use ticker::{
    AutoFormatter, CalendarLocator, FixedFormatter, Locator, Resolution, TickFormatter, TickSet,
};
