use crate::dates::error::InvalidDateError;
use crate::dates::parse::parse_date;
use crate::types::date_range::DateRange;
use chrono::Duration;

/// Number of days looked back from the report date when no end date is given.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 7;

/// Derives the historical query window for a report date.
///
/// When `explicit_end_date` is `None`, the second endpoint is
/// `report_date - lookback_days`. Both endpoints are parsed with [`parse_date`]
/// and the resulting range is always chronologically ordered, whichever of the
/// two came first.
///
/// # Errors
///
/// Returns [`InvalidDateError`] if either date string cannot be parsed, or if
/// `lookback_days` moves the report date outside the representable calendar.
///
/// # Examples
///
/// ```
/// use weather_enrich::resolve_date_range;
///
/// let range = resolve_date_range("01/05/2016", None, 7).unwrap();
/// assert_eq!(range.start_compact(), "20151229");
/// assert_eq!(range.end_compact(), "20160105");
/// ```
pub fn resolve_date_range(
    report_date: &str,
    explicit_end_date: Option<&str>,
    lookback_days: i64,
) -> Result<DateRange, InvalidDateError> {
    let report = parse_date(report_date)?;
    let other = match explicit_end_date {
        Some(end) => parse_date(end)?,
        // lookbacks past chrono's range are reported like an unparseable date
        None => Duration::try_days(lookback_days)
            .and_then(|d| report.checked_sub_signed(d))
            .ok_or_else(|| InvalidDateError::new(report_date))?,
    };
    Ok(DateRange::ordered(report, other))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_lookback_crosses_year_boundary() -> Result<(), InvalidDateError> {
        let range = resolve_date_range("01/05/2016", None, DEFAULT_LOOKBACK_DAYS)?;
        assert_eq!(range.start(), date(2015, 12, 29));
        assert_eq!(range.end(), date(2016, 1, 5));
        Ok(())
    }

    #[test]
    fn test_explicit_end_date_is_ordered() -> Result<(), InvalidDateError> {
        // explicit date later than the report date
        let range = resolve_date_range("2016-01-05", Some("2016-02-01"), 7)?;
        assert_eq!(range.start(), date(2016, 1, 5));
        assert_eq!(range.end(), date(2016, 2, 1));

        // explicit date earlier than the report date
        let range = resolve_date_range("2016-01-05", Some("12/01/2015"), 7)?;
        assert_eq!(range.start(), date(2015, 12, 1));
        assert_eq!(range.end(), date(2016, 1, 5));
        Ok(())
    }

    #[test]
    fn test_start_never_after_end() {
        let reports = ["01/05/2016", "2016-03-01", "20000229", "December 31, 1999"];
        for report in reports {
            for lookback in [-30, -1, 0, 1, 7, 365] {
                let range = resolve_date_range(report, None, lookback).unwrap();
                assert!(range.start() <= range.end(), "{report} / {lookback}");
            }
            for end in ["1900-01-01", "2100-12-31", report] {
                let range = resolve_date_range(report, Some(end), 7).unwrap();
                assert!(range.start() <= range.end(), "{report} / {end}");
            }
        }
    }

    #[test]
    fn test_out_of_range_lookback_is_an_error() {
        for lookback in [i64::MAX, i64::MIN, 1_000_000_000] {
            let err = resolve_date_range("2016-01-05", None, lookback).unwrap_err();
            assert_eq!(err.input, "2016-01-05");
        }
    }

    #[test]
    fn test_invalid_dates() {
        let err = resolve_date_range("not-a-date", None, 7).unwrap_err();
        assert_eq!(err.input, "not-a-date");

        let err = resolve_date_range("2016-01-05", Some("yesterday"), 7).unwrap_err();
        assert_eq!(err.input, "yesterday");
    }
}
