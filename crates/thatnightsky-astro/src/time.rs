//! Time scales: Julian date and mean sidereal time

use chrono::{DateTime, Utc};

/// Julian date of the Unix epoch
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

/// Julian date of J2000.0 (2000-01-01 12:00 TT)
pub const J2000_JD: f64 = 2_451_545.0;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;

/// Julian date of an instant
///
/// UT1 is approximated by UTC; the difference is below a second.
pub fn julian_date(instant: &DateTime<Utc>) -> f64 {
    let seconds = instant.timestamp() as f64 + f64::from(instant.timestamp_subsec_nanos()) * 1e-9;
    seconds / 86_400.0 + UNIX_EPOCH_JD
}

/// Julian centuries elapsed since J2000.0
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees, normalised to [0, 360)
///
/// IAU 1982 expression in the form of Meeus (12.4).
pub fn greenwich_mean_sidereal_deg(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let gmst = 280.460_618_37 + 360.985_647_366_29 * (jd - J2000_JD) + 0.000_387_933 * t * t
        - t * t * t / 38_710_000.0;
    normalize_degrees(gmst)
}

/// Local mean sidereal time in degrees for an east-positive longitude
pub fn local_sidereal_deg(jd: f64, longitude_deg: f64) -> f64 {
    normalize_degrees(greenwich_mean_sidereal_deg(jd) + longitude_deg)
}

/// Wrap an angle into [0, 360)
pub fn normalize_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}
