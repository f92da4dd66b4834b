//! Conversion between axis numbers and calendar dates.
//!
//! Converts between real numbers counted in a time unit (`"days since
//! 2000-01-01"`, `"hours since 2000-01-01"`, ...) and structured dates under
//! one of the supported calendar systems.
//!
//! # Calendars
//!
//! | Identifier(s)                 | Year length          | Year zero |
//! |-------------------------------|----------------------|-----------|
//! | `standard`, `gregorian`       | Julian, then Gregorian from 1582-10-15 | no |
//! | `proleptic_gregorian`         | Gregorian throughout | no        |
//! | `julian`                      | Julian throughout    | no        |
//! | `noleap`, `365_day`           | 365 days             | yes       |
//! | `all_leap`, `366_day`         | 366 days             | yes       |
//! | `360_day`                     | 12 × 30 days         | yes       |
//!
//! The first three form the *real-world* family: year -1 (1 BCE) is directly
//! followed by year 1.
//!
//! # Examples
//!
//! ```rust
//! use caltick::calendar::{self, Calendar, CalendarDate};
//! use caltick::Shaped;
//!
//! let date = calendar::to_date(5333.0, "days since 2000-01-01", Calendar::NoLeap).unwrap();
//! assert_eq!((date.year(), date.month(), date.day()), (2014, 8, 12));
//!
//! let dates = Shaped::Sequence(vec![date]);
//! let back = calendar::to_numeric(&dates, "days since 2000-01-01", Calendar::NoLeap).unwrap();
//! assert_eq!(back, Shaped::Sequence(vec![5333.0]));
//! ```

mod date;
mod unit;

use std::fmt;
use std::str::FromStr;

pub use date::CalendarDate;
pub(crate) use date::validate_pattern;
pub use unit::{TimeUnit, UnitScale, AXIS_UNIT};

use crate::error::{AxisError, Result};
use crate::shaped::Shaped;

/// Microseconds in one day.
pub(crate) const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Julian Day Number of 1582-10-15, the first Gregorian day of `standard`.
const GREGORIAN_START_JDN: i64 = 2_299_161;

const NOLEAP_MONTHS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const ALL_LEAP_MONTHS: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAY360_MONTHS: [u32; 12] = [30; 12];

/// A calendar system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Calendar {
    /// Mixed Julian/Gregorian civil calendar (`standard`, `gregorian`).
    Standard,
    /// Gregorian rules extended backwards indefinitely.
    ProlepticGregorian,
    /// Julian rules throughout.
    Julian,
    /// 365-day years (`noleap`, `365_day`).
    NoLeap,
    /// 366-day years (`all_leap`, `366_day`).
    AllLeap,
    /// Twelve 30-day months.
    Day360,
}

impl Calendar {
    /// Every supported calendar.
    pub const ALL: [Calendar; 6] = [
        Calendar::Standard,
        Calendar::ProlepticGregorian,
        Calendar::Julian,
        Calendar::NoLeap,
        Calendar::AllLeap,
        Calendar::Day360,
    ];

    /// Canonical identifier.
    pub fn name(self) -> &'static str {
        match self {
            Calendar::Standard => "standard",
            Calendar::ProlepticGregorian => "proleptic_gregorian",
            Calendar::Julian => "julian",
            Calendar::NoLeap => "noleap",
            Calendar::AllLeap => "all_leap",
            Calendar::Day360 => "360_day",
        }
    }

    /// Whether the calendar models historical civil timekeeping.
    pub fn is_real_world(self) -> bool {
        matches!(
            self,
            Calendar::Standard | Calendar::ProlepticGregorian | Calendar::Julian
        )
    }

    /// Whether year 0 is a valid year.
    pub fn has_year_zero(self) -> bool {
        !self.is_real_world()
    }

    /// Whether `year` has a leap day.
    ///
    /// Real-world years are numbered without a year zero, so the Julian
    /// leap years before the common era are -1, -5, -9, ...
    pub fn is_leap_year(self, year: i32) -> bool {
        let a = self.to_astronomical(year);
        match self {
            Calendar::NoLeap | Calendar::Day360 => false,
            Calendar::AllLeap => true,
            Calendar::Julian => a.rem_euclid(4) == 0,
            Calendar::ProlepticGregorian => gregorian_leap(a),
            Calendar::Standard => {
                if a < 1582 {
                    a.rem_euclid(4) == 0
                } else {
                    gregorian_leap(a)
                }
            }
        }
    }

    /// Number of days in `month` (1-based) of `year`, or 0 for a month
    /// outside `1..=12`.
    pub fn days_in_month(self, year: i32, month: u32) -> u32 {
        if !(1..=12).contains(&month) {
            return 0;
        }
        let idx = (month - 1) as usize;
        match self.fixed_months() {
            Some(lengths) => lengths[idx],
            None if month == 2 && self.is_leap_year(year) => 29,
            None => NOLEAP_MONTHS[idx],
        }
    }

    /// Checks that the fields name a date that exists in this calendar.
    pub fn validate(self, year: i32, month: u32, day: u32) -> Result<()> {
        let invalid = AxisError::InvalidDate {
            year,
            month,
            day,
            calendar: self,
        };
        if year == 0 && !self.has_year_zero() {
            return Err(invalid);
        }
        if day == 0 || day > self.days_in_month(year, month) {
            return Err(invalid);
        }
        if self == Calendar::Standard && year == 1582 && month == 10 && (5..=14).contains(&day) {
            return Err(invalid);
        }
        Ok(())
    }

    /// Continuous day count for a validated date.
    ///
    /// Real-world calendars count Julian Day Numbers; the fixed-length
    /// calendars count days from their own year zero.
    pub(crate) fn day_number(self, year: i32, month: u32, day: u32) -> Result<i64> {
        self.validate(year, month, day)?;
        if let Some(lengths) = self.fixed_months() {
            let year_length: i64 = lengths.iter().map(|&d| d as i64).sum();
            let before: i64 = lengths[..(month - 1) as usize]
                .iter()
                .map(|&d| d as i64)
                .sum();
            return Ok(year as i64 * year_length + before + day as i64 - 1);
        }

        let a = self.to_astronomical(year);
        let jdn = match self {
            Calendar::ProlepticGregorian => gregorian_to_jdn(a, month, day),
            Calendar::Julian => julian_to_jdn(a, month, day),
            _ if (a, month, day) >= (1582, 10, 15) => gregorian_to_jdn(a, month, day),
            _ => julian_to_jdn(a, month, day),
        };
        Ok(jdn)
    }

    /// Inverse of [`Calendar::day_number`]: `(year, month, day)`.
    pub(crate) fn ymd_from_day_number(self, n: i64) -> (i32, u32, u32) {
        if let Some(lengths) = self.fixed_months() {
            let year_length: i64 = lengths.iter().map(|&d| d as i64).sum();
            let year = n.div_euclid(year_length);
            let mut rem = n.rem_euclid(year_length);
            let mut month = 1;
            for &len in lengths {
                if rem < len as i64 {
                    break;
                }
                rem -= len as i64;
                month += 1;
            }
            return (year as i32, month, rem as u32 + 1);
        }

        let (a, month, day) = match self {
            Calendar::ProlepticGregorian => jdn_to_gregorian(n),
            Calendar::Julian => jdn_to_julian(n),
            _ if n >= GREGORIAN_START_JDN => jdn_to_gregorian(n),
            _ => jdn_to_julian(n),
        };
        (self.from_astronomical(a), month, day)
    }

    fn fixed_months(self) -> Option<&'static [u32; 12]> {
        match self {
            Calendar::NoLeap => Some(&NOLEAP_MONTHS),
            Calendar::AllLeap => Some(&ALL_LEAP_MONTHS),
            Calendar::Day360 => Some(&DAY360_MONTHS),
            _ => None,
        }
    }

    fn to_astronomical(self, year: i32) -> i64 {
        if self.is_real_world() && year < 0 {
            year as i64 + 1
        } else {
            year as i64
        }
    }

    fn from_astronomical(self, a: i64) -> i32 {
        if self.is_real_world() && a <= 0 {
            (a - 1) as i32
        } else {
            a as i32
        }
    }
}

impl fmt::Display for Calendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Calendar {
    type Err = AxisError;

    fn from_str(s: &str) -> Result<Self> {
        let id = s.trim().to_ascii_lowercase();
        match id.as_str() {
            "" => Err(AxisError::MissingCalendar),
            "standard" | "gregorian" => Ok(Calendar::Standard),
            "proleptic_gregorian" => Ok(Calendar::ProlepticGregorian),
            "julian" => Ok(Calendar::Julian),
            "noleap" | "365_day" => Ok(Calendar::NoLeap),
            "all_leap" | "366_day" => Ok(Calendar::AllLeap),
            "360_day" => Ok(Calendar::Day360),
            _ => Err(AxisError::UnknownCalendar(s.to_string())),
        }
    }
}

/// Converts `value`, counted in `unit`, to a date under `calendar`.
///
/// Fails with [`AxisError::InvalidUnit`] when `unit` is not a
/// `"<scale> since <epoch>"` string.
pub fn to_date(value: f64, unit: &str, calendar: Calendar) -> Result<CalendarDate> {
    unit.parse::<TimeUnit>()?.to_date(value, calendar)
}

/// Converts dates under `calendar` to numbers counted in `unit`, keeping the
/// input's shape.
pub fn to_numeric(
    dates: &Shaped<CalendarDate>,
    unit: &str,
    calendar: Calendar,
) -> Result<Shaped<f64>> {
    let unit: TimeUnit = unit.parse()?;
    dates.try_map_ref(|date| {
        if date.calendar() != calendar {
            return Err(AxisError::MixedCalendars {
                first: calendar,
                other: date.calendar(),
            });
        }
        unit.to_numeric(date)
    })
}

fn gregorian_leap(a: i64) -> bool {
    a.rem_euclid(4) == 0 && (a.rem_euclid(100) != 0 || a.rem_euclid(400) == 0)
}

// Day-of-era arithmetic over March-based years, so the leap day is the last
// day of each cycle year and floor division handles negative years.

fn march_day_of_year(month: u32, day: u32) -> i64 {
    let mp = (month as i64 + 9) % 12;
    (153 * mp + 2) / 5 + day as i64 - 1
}

fn month_day_from_march_day(doy: i64) -> (u32, u32) {
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    (month as u32, day as u32)
}

fn gregorian_to_jdn(a: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { a - 1 } else { a };
    let era = y.div_euclid(400);
    let yoe = y - era * 400;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + march_day_of_year(month, day);
    era * 146_097 + doe + 1_721_120
}

fn jdn_to_gregorian(jdn: i64) -> (i64, u32, u32) {
    let z = jdn - 1_721_120;
    let era = z.div_euclid(146_097);
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let (month, day) = month_day_from_march_day(doy);
    let y = yoe + era * 400;
    (if month <= 2 { y + 1 } else { y }, month, day)
}

fn julian_to_jdn(a: i64, month: u32, day: u32) -> i64 {
    let y = if month <= 2 { a - 1 } else { a };
    let era = y.div_euclid(4);
    let yoe = y - era * 4;
    era * 1461 + yoe * 365 + march_day_of_year(month, day) + 1_721_118
}

fn jdn_to_julian(jdn: i64) -> (i64, u32, u32) {
    let z = jdn - 1_721_118;
    let era = z.div_euclid(1461);
    let doe = z - era * 1461;
    let yoe = (doe - doe / 1460) / 365;
    let doy = doe - 365 * yoe;
    let (month, day) = month_day_from_march_day(doy);
    let y = yoe + era * 4;
    (if month <= 2 { y + 1 } else { y }, month, day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_identifiers_and_synonyms() {
        assert_eq!("standard".parse::<Calendar>().unwrap(), Calendar::Standard);
        assert_eq!("Gregorian".parse::<Calendar>().unwrap(), Calendar::Standard);
        assert_eq!("365_day".parse::<Calendar>().unwrap(), Calendar::NoLeap);
        assert_eq!("366_day".parse::<Calendar>().unwrap(), Calendar::AllLeap);
        assert_eq!("360_day".parse::<Calendar>().unwrap(), Calendar::Day360);
        for cal in Calendar::ALL {
            assert_eq!(cal.name().parse::<Calendar>().unwrap(), cal);
        }
    }

    #[test]
    fn test_parse_rejects_empty_and_unknown() {
        assert_eq!("".parse::<Calendar>(), Err(AxisError::MissingCalendar));
        assert_eq!(
            "mayan".parse::<Calendar>(),
            Err(AxisError::UnknownCalendar("mayan".into()))
        );
    }

    #[test]
    fn test_known_julian_day_numbers() {
        let greg = Calendar::ProlepticGregorian;
        assert_eq!(greg.day_number(1970, 1, 1).unwrap(), 2_440_588);
        assert_eq!(greg.day_number(2000, 1, 1).unwrap(), 2_451_545);
        assert_eq!(
            Calendar::Standard.day_number(1582, 10, 4).unwrap() + 1,
            Calendar::Standard.day_number(1582, 10, 15).unwrap()
        );
        assert_eq!(
            Calendar::Standard.day_number(1582, 10, 15).unwrap(),
            GREGORIAN_START_JDN
        );
    }

    #[test]
    fn test_day_number_round_trip_all_calendars() {
        for cal in Calendar::ALL {
            let mut n = -3_000_000i64;
            while n < 3_000_000 {
                let (y, m, d) = cal.ymd_from_day_number(n);
                assert_eq!(cal.day_number(y, m, d).unwrap(), n, "{cal} day {n}");
                n += 997;
            }
        }
    }

    #[test]
    fn test_real_world_calendars_skip_year_zero() {
        for cal in [Calendar::Standard, Calendar::ProlepticGregorian, Calendar::Julian] {
            assert!(cal.validate(0, 1, 1).is_err());
            let dec31 = cal.day_number(-1, 12, 31).unwrap();
            assert_eq!(cal.ymd_from_day_number(dec31 + 1), (1, 1, 1));
        }
        for cal in [Calendar::NoLeap, Calendar::AllLeap, Calendar::Day360] {
            let dec_end = cal.day_number(-1, 12, cal.days_in_month(-1, 12)).unwrap();
            assert_eq!(cal.ymd_from_day_number(dec_end + 1), (0, 1, 1));
        }
    }

    #[test]
    fn test_leap_rules() {
        assert!(Calendar::Julian.is_leap_year(1900));
        assert!(!Calendar::ProlepticGregorian.is_leap_year(1900));
        assert!(Calendar::Standard.is_leap_year(1500));
        assert!(!Calendar::Standard.is_leap_year(1700));
        assert!(Calendar::Julian.is_leap_year(-1));
        assert!(!Calendar::NoLeap.is_leap_year(2000));
        assert!(Calendar::AllLeap.is_leap_year(2001));
        assert_eq!(Calendar::Day360.days_in_month(2001, 2), 30);
    }

    #[test]
    fn test_validate_rejects_missing_days() {
        assert!(Calendar::NoLeap.validate(2000, 2, 29).is_err());
        assert!(Calendar::Day360.validate(2000, 2, 30).is_ok());
        assert!(Calendar::Day360.validate(2000, 1, 31).is_err());
        assert!(Calendar::Standard.validate(1582, 10, 10).is_err());
        assert!(Calendar::ProlepticGregorian.validate(1582, 10, 10).is_ok());
        assert!(Calendar::Julian.validate(2000, 13, 1).is_err());
    }

    #[test]
    fn test_to_numeric_rejects_foreign_calendar() {
        let date = CalendarDate::new(Calendar::Day360, 2000, 1, 1).unwrap();
        let result = to_numeric(&Shaped::Scalar(date), AXIS_UNIT, Calendar::NoLeap);
        assert_eq!(
            result,
            Err(AxisError::MixedCalendars {
                first: Calendar::NoLeap,
                other: Calendar::Day360,
            })
        );
    }

    #[test]
    fn test_to_date_rejects_malformed_unit() {
        let err = to_date(1.0, "fortnights after 2000", Calendar::NoLeap).unwrap_err();
        assert!(matches!(err, AxisError::InvalidUnit { .. }));
    }
}
