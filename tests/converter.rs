use caltick::calendar::{self, AXIS_UNIT};
use caltick::convert::{AxisUnits, CalendarConverter, Datum};
use caltick::ticker::Resolution;
use caltick::{AxisError, Calendar, CalendarDate, Shaped, TickFormatter};

fn dates(calendar: Calendar, ymd: &[(i32, u32, u32)]) -> Vec<CalendarDate> {
    ymd.iter()
        .map(|&(y, m, d)| CalendarDate::new(calendar, y, m, d).unwrap())
        .collect()
}

#[test]
fn test_converted_dates_round_trip() {
    for calendar in Calendar::ALL {
        let original = dates(calendar, &[(1, 1, 1), (1850, 3, 1), (2000, 1, 1), (2100, 12, 1)]);
        let values = Shaped::Sequence(original.iter().copied().map(Datum::Date).collect());
        let numbers = CalendarConverter::convert(values).unwrap();
        for (number, date) in numbers.iter().zip(&original) {
            assert_eq!(calendar::to_date(*number, AXIS_UNIT, calendar).unwrap(), *date);
        }
    }
}

#[test]
fn test_converter_matches_bridge() {
    let original = dates(Calendar::ProlepticGregorian, &[(1970, 1, 1), (2020, 2, 29)]);
    let via_bridge = calendar::to_numeric(
        &Shaped::Sequence(original.clone()),
        AXIS_UNIT,
        Calendar::ProlepticGregorian,
    )
    .unwrap();
    let datums: Vec<Datum> = original.into_iter().map(Datum::from).collect();
    let via_converter = CalendarConverter::convert(Shaped::Sequence(datums)).unwrap();
    assert_eq!(via_bridge, via_converter);
    assert_eq!(via_bridge, Shaped::Sequence(vec![-10_957.0, 7_364.0]));
}

#[test]
fn test_time_of_day_survives_conversion() {
    let date = CalendarDate::new(Calendar::Day360, 2000, 1, 2)
        .and_then(|d| d.and_hms(18, 0, 0))
        .unwrap();
    let numbers = CalendarConverter::convert(Shaped::Scalar(Datum::Date(date))).unwrap();
    assert_eq!(numbers, Shaped::Scalar(1.75));
}

#[test]
fn test_grid_of_dates() {
    let data: Vec<Datum> = dates(Calendar::NoLeap, &[(2000, 1, 1), (2000, 2, 1), (2001, 1, 1)])
        .into_iter()
        .map(Datum::Date)
        .collect();
    let values = Shaped::Grid {
        shape: vec![3, 1],
        data,
    };
    let numbers = CalendarConverter::convert(values).unwrap();
    assert_eq!(numbers.shape(), vec![3, 1]);
    assert_eq!(numbers.iter().copied().collect::<Vec<_>>(), vec![0.0, 31.0, 365.0]);
}

#[test]
fn test_errors() {
    let empty: Shaped<Datum> = Shaped::Sequence(Vec::new());
    assert_eq!(
        CalendarConverter::default_units(&empty),
        Err(AxisError::EmptyInput)
    );

    let mixed = Shaped::Sequence(vec![
        Datum::Date(CalendarDate::new(Calendar::NoLeap, 2000, 1, 1).unwrap()),
        Datum::Date(CalendarDate::new(Calendar::AllLeap, 2000, 1, 1).unwrap()),
    ]);
    let err = CalendarConverter::default_units(&mixed).unwrap_err();
    assert_eq!(
        err.to_string(),
        "calendar units are not all equal: found noleap and all_leap"
    );

    assert_eq!("".parse::<Calendar>(), Err(AxisError::MissingCalendar));
}

#[test]
fn test_fresh_axis_setup() {
    let values = Shaped::Scalar(Datum::Date(
        CalendarDate::new(Calendar::Day360, 1990, 6, 15).unwrap(),
    ));
    let units = CalendarConverter::default_units(&values).unwrap();
    assert_eq!(units, AxisUnits::new(Calendar::Day360));

    let info = CalendarConverter::axis_info(&units).unwrap();
    assert_eq!(info.default_view().unwrap(), (0.0, 3600.0));
    assert_eq!(info.formatter.resolution(), Resolution::Daily);
    assert_eq!(info.formatter.format(0.0, None).unwrap(), "2000-01-01");

    let (start, end) = info.default_view().unwrap();
    let ticks = info.locator.locate(start, end).unwrap();
    assert_eq!(ticks.resolution, Resolution::Yearly);
    assert_eq!(info.formatter.resolution(), Resolution::Yearly);
    assert_eq!(info.formatter.format(ticks.values[0], Some(0)).unwrap().len(), 4);
}
