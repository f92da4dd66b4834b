use super::locator::CalendarLocator;
use super::{Resolution, ResolutionHandle, TickFormatter, TickSet};
use crate::calendar::{validate_pattern, Calendar, TimeUnit};
use crate::error::Result;

/// Labels ticks at the resolution their locator last used.
///
/// # Examples
///
/// ```rust
/// use caltick::calendar::Calendar;
/// use caltick::ticker::{AutoFormatter, CalendarLocator, Resolution, TickFormatter};
///
/// let locator = CalendarLocator::new(4, Calendar::Day360).unwrap();
/// let formatter = AutoFormatter::new(&locator);
///
/// // Nothing located yet: daily labels.
/// assert_eq!(formatter.format(0.0, None).unwrap(), "2000-01-01");
///
/// locator.locate(0.0, 3600.0).unwrap();
/// assert_eq!(formatter.resolution(), Resolution::Yearly);
/// assert_eq!(formatter.format(0.0, None).unwrap(), "2000");
/// ```
#[derive(Clone, Debug)]
pub struct AutoFormatter {
    resolution: ResolutionHandle,
    calendar: Calendar,
    unit: TimeUnit,
}

impl AutoFormatter {
    /// Formatter following `locator`'s resolution, calendar and unit.
    pub fn new(locator: &CalendarLocator) -> Self {
        Self {
            resolution: locator.resolution_handle(),
            calendar: locator.calendar(),
            unit: *locator.unit(),
        }
    }

    /// Resolution the next [`TickFormatter::format`] call will use.
    pub fn resolution(&self) -> Resolution {
        self.resolution.get()
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }

    /// Label for `value` at an explicit resolution.
    pub fn format_with(&self, value: f64, resolution: Resolution) -> Result<String> {
        self.unit
            .to_date(value, self.calendar)?
            .format(resolution.pattern())
    }

    /// Labels for every tick of `ticks`, at the resolution they carry.
    pub fn format_ticks(&self, ticks: &TickSet) -> Result<Vec<String>> {
        ticks
            .values
            .iter()
            .map(|&value| self.format_with(value, ticks.resolution))
            .collect()
    }
}

impl TickFormatter for AutoFormatter {
    fn format(&self, value: f64, _pos: Option<usize>) -> Result<String> {
        self.format_with(value, self.resolution.get())
    }
}

/// Labels every tick with one pattern.
///
/// # Examples
///
/// ```rust
/// use caltick::calendar::Calendar;
/// use caltick::ticker::{FixedFormatter, TickFormatter};
///
/// let formatter = FixedFormatter::new("%d/%m/%Y", Calendar::Day360).unwrap();
/// assert_eq!(formatter.format(59.0, Some(0)).unwrap(), "30/02/2000");
///
/// assert!(FixedFormatter::new("%A", Calendar::Day360).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct FixedFormatter {
    pattern: String,
    calendar: Calendar,
}

impl FixedFormatter {
    /// Fails when `pattern` uses a directive that cannot be rendered.
    pub fn new(pattern: impl Into<String>, calendar: Calendar) -> Result<Self> {
        let pattern = pattern.into();
        validate_pattern(&pattern)?;
        Ok(Self { pattern, calendar })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn calendar(&self) -> Calendar {
        self.calendar
    }
}

impl TickFormatter for FixedFormatter {
    fn format(&self, value: f64, _pos: Option<usize>) -> Result<String> {
        TimeUnit::axis()
            .to_date(value, self.calendar)?
            .format(&self.pattern)
    }
}
