//! Timestamp parsing against a caller-supplied `strftime`-style format

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, ParseError};

/// Parse `value` with `format`.
///
/// Fields the format does not mention take their zero value: no offset reads as
/// UTC, no time of day as midnight, no day as the 1st, no month as January and no
/// year as year 0.
pub fn parse(value: &str, format: &str) -> Result<DateTime<FixedOffset>, ParseError> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, value, StrftimeItems::new(format))?;
    fill_missing(&mut parsed)?;
    parsed.to_datetime()
}

fn fill_missing(parsed: &mut Parsed) -> Result<(), ParseError> {
    // A unix timestamp pins the whole instant on its own
    if parsed.timestamp().is_some() {
        return Ok(());
    }

    let has_year = parsed.year().is_some()
        || parsed.year_div_100().is_some()
        || parsed.year_mod_100().is_some()
        || parsed.isoyear().is_some()
        || parsed.isoyear_div_100().is_some()
        || parsed.isoyear_mod_100().is_some();
    if !has_year {
        parsed.set_year(0)?;
    }

    let has_week = parsed.week_from_sun().is_some()
        || parsed.week_from_mon().is_some()
        || parsed.isoweek().is_some();
    if parsed.month().is_none() && parsed.ordinal().is_none() && !has_week {
        parsed.set_month(1)?;
    }
    if parsed.month().is_some() && parsed.day().is_none() {
        parsed.set_day(1)?;
    }

    match (parsed.hour_div_12(), parsed.hour_mod_12()) {
        (None, None) => parsed.set_hour(0)?,
        // %I without %p
        (None, Some(_)) => parsed.set_ampm(false)?,
        // %p without %I
        (Some(_), None) => parsed.set_hour12(12)?,
        (Some(_), Some(_)) => {}
    }
    if parsed.minute().is_none() {
        parsed.set_minute(0)?;
    }
    if parsed.nanosecond().is_some() && parsed.second().is_none() {
        parsed.set_second(0)?;
    }
    if parsed.offset().is_none() {
        parsed.set_offset(0)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_format_with_offset() {
        let parsed = parse("2024-03-01T12:30:00+09:00", "%Y-%m-%dT%H:%M:%S%:z").unwrap();
        let expected = FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 12, 30, 0)
            .unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.offset().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_format_without_offset_is_utc() {
        let parsed = parse("2024-03-01 12:30:00", "%Y-%m-%d %H:%M:%S").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert_eq!(parsed.offset().local_minus_utc(), 0);
    }

    #[test]
    fn test_date_only_format_is_midnight() {
        let parsed = parse("2024-03-01", "%Y-%m-%d").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_mismatch_is_error() {
        assert!(parse("01/03/2024", "%Y-%m-%d").is_err());
        assert!(parse("2024-03-01 12:30", "%Y-%m-%d %H:%M:%S").is_err());
        assert!(parse("2024-13-01", "%Y-%m-%d").is_err());
    }

    #[test]
    fn test_time_only_format_is_year_zero() {
        let parsed = parse("12:30", "%H:%M").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(0, 1, 1, 12, 30, 0).unwrap());
    }

    #[test]
    fn test_partial_date_formats_fill_first_day() {
        let parsed = parse("2024-03", "%Y-%m").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let parsed = parse("2024", "%Y").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_twelve_hour_clock_without_meridiem() {
        let parsed = parse("2024-03-01 03:15", "%Y-%m-%d %I:%M").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 3, 15, 0).unwrap());

        let parsed = parse("2024-03-01 03:15 PM", "%Y-%m-%d %I:%M %p").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 15, 15, 0).unwrap());
    }

    #[test]
    fn test_unix_timestamp_format() {
        let parsed = parse("1709296200", "%s").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
    }
}
