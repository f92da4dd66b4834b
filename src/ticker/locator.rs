use std::cell::Cell;
use std::rc::Rc;

use super::max_n::MaxNLocator;
use super::util::nonsingular;
use super::{Locator, Resolution, ResolutionHandle, TickSet};
use crate::calendar::{Calendar, CalendarDate, TimeUnit, UnitScale};
use crate::error::{AxisError, Result};

/// Tick budget used when a host sets up an axis without choosing one.
pub const DEFAULT_MAX_N_TICKS: usize = 4;

const SECONDS_PER_DAY: f64 = 86_400.0;
const MINUTES_PER_DAY: f64 = 1_440.0;
const HOURS_PER_DAY: f64 = 24.0;

/// Preferred day steps: favours weeks over five-day intervals.
const DAY_STEPS: [f64; 5] = [1.0, 2.0, 4.0, 7.0, 10.0];

/// Outcome of [`classify`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    pub resolution: Resolution,
    /// Rough number of `resolution` units in the range.
    pub approx_count: u64,
}

/// Picks the resolution for a view range spanning `num1..num2` days.
///
/// Each check overrides the previous one, so the coarsest resolution whose
/// unit count still exceeds `max_n_ticks` wins.
///
/// # Examples
///
/// ```rust
/// use caltick::calendar::{Calendar, CalendarDate};
/// use caltick::ticker::{classify, Resolution};
///
/// let start = CalendarDate::new(Calendar::NoLeap, 2000, 1, 1).unwrap();
/// let end = CalendarDate::new(Calendar::NoLeap, 2001, 1, 1).unwrap();
/// let class = classify(0.0, 365.0, &start, &end, 4);
/// assert_eq!(class.resolution, Resolution::Monthly);
/// assert_eq!(class.approx_count, 12);
/// ```
pub fn classify(
    num1: f64,
    num2: f64,
    date1: &CalendarDate,
    date2: &CalendarDate,
    max_n_ticks: usize,
) -> Classification {
    let days = (num1 - num2).abs();
    let max = max_n_ticks as f64;

    let mut resolution = Resolution::Secondly;
    let mut approx_count = SECONDS_PER_DAY as u64;
    if days * MINUTES_PER_DAY > max {
        resolution = Resolution::Minutely;
        approx_count = (days * MINUTES_PER_DAY) as u64;
    }
    if days * HOURS_PER_DAY > max {
        resolution = Resolution::Hourly;
        approx_count = (days * HOURS_PER_DAY) as u64;
    }
    if days > max {
        resolution = Resolution::Daily;
        approx_count = days as u64;
    }
    if days > 30.0 * max {
        resolution = Resolution::Monthly;
        approx_count = (days / 30.0).floor() as u64;
    }
    if days > 365.0 * max {
        resolution = Resolution::Yearly;
        approx_count = (date1.year() as i64 - date2.year() as i64).unsigned_abs();
    }
    Classification {
        resolution,
        approx_count,
    }
}

/// Places at most about `max_n_ticks + 1` ticks on round calendar
/// boundaries: whole years, first days of months, whole days, hours,
/// minutes or seconds depending on the width of the view range.
///
/// Values are axis numbers in days since 2000-01-01 under the locator's
/// calendar. Every call to [`CalendarLocator::locate`] records the
/// resolution it used; formatters built with
/// [`AutoFormatter::new`](super::AutoFormatter::new) read it back.
///
/// Year 0 does not exist in the real-world calendars; ticks that fall on it
/// are dropped without replacement, so such a range can get fewer ticks.
///
/// # Examples
///
/// ```rust
/// use caltick::calendar::Calendar;
/// use caltick::ticker::{CalendarLocator, Resolution};
///
/// let locator = CalendarLocator::new(4, Calendar::NoLeap).unwrap();
/// assert_eq!(locator.resolution(), Resolution::Daily);
///
/// let ticks = locator.locate(0.0, 365.0).unwrap();
/// assert_eq!(ticks.resolution, Resolution::Monthly);
/// assert_eq!(ticks.values, vec![31.0, 120.0, 212.0, 304.0, 396.0]);
/// assert_eq!(locator.resolution(), Resolution::Monthly);
/// ```
#[derive(Debug)]
pub struct CalendarLocator {
    max_n_ticks: usize,
    calendar: Calendar,
    unit: TimeUnit,
    generic: MaxNLocator,
    daily: MaxNLocator,
    resolution: Rc<Cell<Resolution>>,
}

impl CalendarLocator {
    /// Locator for `calendar` with a budget of `max_n_ticks` intervals.
    pub fn new(max_n_ticks: usize, calendar: Calendar) -> Result<Self> {
        let generic = MaxNLocator::new(max_n_ticks)?.with_integer(true);
        let daily = MaxNLocator::new(max_n_ticks)?
            .with_steps(&DAY_STEPS)?
            .with_integer(true);
        Ok(Self {
            max_n_ticks,
            calendar,
            unit: TimeUnit::axis(),
            generic,
            daily,
            resolution: Rc::new(Cell::new(Resolution::default())),
        })
    }

    /// Locator whose axis numbers count days from another epoch.
    ///
    /// Deprecated: hosts should convert to `days since 2000-01-01`. The unit
    /// must be day-based.
    pub fn with_date_unit(max_n_ticks: usize, calendar: Calendar, unit: &str) -> Result<Self> {
        tracing::warn!(
            unit,
            "the date unit argument of the calendar locator is deprecated"
        );
        let parsed: TimeUnit = unit.parse()?;
        if !parsed.is_daily() {
            return Err(AxisError::NonDailyUnit {
                unit: unit.to_string(),
            });
        }
        let mut locator = Self::new(max_n_ticks, calendar)?;
        locator.unit = parsed;
        Ok(locator)
    }

    /// Also makes the outermost ticks usable as round axis limits.
    pub fn with_round_numbers(mut self, round_numbers: bool) -> Self {
        self.generic = self.generic.with_round_numbers(round_numbers);
        self.daily = self.daily.with_round_numbers(round_numbers);
        self
    }

    pub fn max_n_ticks(&self) -> usize {
        self.max_n_ticks
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    pub fn unit(&self) -> &TimeUnit {
        &self.unit
    }

    /// Resolution of the last [`CalendarLocator::locate`] call, `Daily`
    /// before the first.
    pub fn resolution(&self) -> Resolution {
        self.resolution.get()
    }

    /// Shared read-only view of [`CalendarLocator::resolution`].
    pub fn resolution_handle(&self) -> ResolutionHandle {
        ResolutionHandle::new(Rc::clone(&self.resolution))
    }

    /// Tick positions for the view range `[vmin, vmax]` and the resolution
    /// they were generated at.
    pub fn locate(&self, vmin: f64, vmax: f64) -> Result<TickSet> {
        let (vmin, vmax) = nonsingular(vmin, vmax, 1e-7, 1e-13);
        let lower = self.unit.to_date(vmin, self.calendar)?;
        let upper = self.unit.to_date(vmax, self.calendar)?;

        let class = classify(vmin, vmax, &lower, &upper, self.max_n_ticks);
        self.resolution.set(class.resolution);
        tracing::debug!(
            calendar = %self.calendar,
            resolution = %class.resolution,
            approx_count = class.approx_count,
            "classified view range [{vmin}, {vmax}]"
        );

        let dates = match class.resolution {
            Resolution::Yearly => self.year_starts(&lower, &upper),
            Resolution::Monthly => self.month_starts(&lower, class.approx_count),
            Resolution::Daily => self.whole_days(vmin, vmax)?,
            Resolution::Hourly => self.sub_daily(UnitScale::Hours, &lower, &upper)?,
            Resolution::Minutely => self.sub_daily(UnitScale::Minutes, &lower, &upper)?,
            Resolution::Secondly => self.sub_daily(UnitScale::Seconds, &lower, &upper)?,
        };

        let values = self.to_axis_numbers(dates)?;
        tracing::debug!(count = values.len(), "generated calendar ticks");
        Ok(TickSet {
            resolution: class.resolution,
            values,
        })
    }

    /// January firsts of whole years.
    ///
    /// A view inside a single year widens to a sub-year range, so the
    /// sub-locator can return fractional years that share a whole year.
    fn year_starts(&self, lower: &CalendarDate, upper: &CalendarDate) -> Vec<CalendarDate> {
        let mut years: Vec<i32> = self
            .generic
            .tick_values(lower.year() as f64, upper.year() as f64)
            .into_iter()
            .map(|year| year.round() as i32)
            .collect();
        years.dedup();
        years
            .into_iter()
            .map(|year| CalendarDate::unchecked(self.calendar, year, 1, 1))
            .collect()
    }

    /// First days of months, counted from the month after `lower`'s.
    fn month_starts(&self, lower: &CalendarDate, approx_count: u64) -> Vec<CalendarDate> {
        self.generic
            .tick_values(0.0, approx_count as f64)
            .into_iter()
            .map(|offset| {
                let months = lower.month() as f64 + offset;
                let year = lower.year() + (months / 12.0).floor() as i32;
                let month = months.rem_euclid(12.0) as u32 + 1;
                CalendarDate::unchecked(self.calendar, year, month, 1)
            })
            .collect()
    }

    fn whole_days(&self, vmin: f64, vmax: f64) -> Result<Vec<CalendarDate>> {
        self.daily
            .tick_values(vmin, vmax)
            .into_iter()
            .map(|day| self.unit.to_date(day, self.calendar))
            .collect()
    }

    /// Ticks at round multiples of `scale`, counted from 2000-01-01.
    fn sub_daily(
        &self,
        scale: UnitScale,
        lower: &CalendarDate,
        upper: &CalendarDate,
    ) -> Result<Vec<CalendarDate>> {
        let unit = TimeUnit::new(scale, 2000, 1, 1);
        let start = unit.to_numeric(lower)?;
        let end = unit.to_numeric(upper)?;
        self.generic
            .tick_values(start, end)
            .into_iter()
            .map(|value| unit.to_date(value, self.calendar))
            .collect()
    }

    fn to_axis_numbers(&self, dates: Vec<CalendarDate>) -> Result<Vec<f64>> {
        let skip_year_zero = !self.calendar.has_year_zero();
        dates
            .into_iter()
            .filter(|date| {
                let keep = !(skip_year_zero && date.year() == 0);
                if !keep {
                    tracing::trace!(calendar = %self.calendar, "dropping tick in year 0");
                }
                keep
            })
            .map(|date| self.unit.to_numeric(&date))
            .collect()
    }
}

impl Locator for CalendarLocator {
    fn tick_values(&self, vmin: f64, vmax: f64) -> Result<Vec<f64>> {
        self.locate(vmin, vmax).map(|ticks| ticks.values)
    }
}
