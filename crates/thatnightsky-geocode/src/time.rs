//! Local time string parsing

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone, Utc};
use thatnightsky_core::error::{NightSkyError, Result};

/// Accepted local date-time layouts
pub const LOCAL_TIME_FORMATS: &[&str] =
    &["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Parse a naive local date-time and attach a fixed UTC offset
///
/// ```
/// use chrono::FixedOffset;
/// use thatnightsky_geocode::time::parse_local_time;
///
/// let kst = FixedOffset::east_opt(9 * 3600).unwrap();
/// let instant = parse_local_time("1995-01-15 00:00", kst).unwrap();
/// assert_eq!(instant.to_rfc3339(), "1995-01-14T15:00:00+00:00");
/// ```
pub fn parse_local_time(input: &str, offset: FixedOffset) -> Result<DateTime<Utc>> {
    let trimmed = input.trim();
    let naive = LOCAL_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| NightSkyError::InvalidTime {
            input: input.to_string(),
            reason: "expected YYYY-MM-DD HH:MM".to_string(),
        })?;

    offset
        .from_local_datetime(&naive)
        .single()
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| NightSkyError::InvalidTime {
            input: input.to_string(),
            reason: format!("not representable at offset {}", offset),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    fn kst() -> FixedOffset {
        FixedOffset::east_opt(9 * 3600).unwrap()
    }

    #[test]
    fn test_kst_midnight_is_previous_utc_day() {
        let instant = parse_local_time("1995-01-15 00:00", kst()).unwrap();
        assert_eq!(instant.to_rfc3339(), "1995-01-14T15:00:00+00:00");
    }

    #[test]
    fn test_accepted_layouts() {
        let layouts = [
            "2002-06-22 21:30",
            "2002-06-22T21:30",
            "2002-06-22 21:30:00",
            " 2002-06-22T21:30:00 ",
        ];
        for input in layouts {
            let instant = parse_local_time(input, kst()).unwrap();
            assert_eq!(instant.hour(), 12, "{}", input);
        }
    }

    #[test]
    fn test_other_offsets() {
        let utc = FixedOffset::east_opt(0).unwrap();
        let instant = parse_local_time("2000-01-01 12:00", utc).unwrap();
        assert_eq!(instant.to_rfc3339(), "2000-01-01T12:00:00+00:00");
    }

    #[test]
    fn test_invalid_inputs() {
        for input in ["", "yesterday", "1995-13-01 00:00", "1995-01-15", "15/01/1995 00:00"] {
            let err = parse_local_time(input, kst()).unwrap_err();
            assert!(matches!(err, NightSkyError::InvalidTime { .. }), "{}", input);
        }
    }
}
