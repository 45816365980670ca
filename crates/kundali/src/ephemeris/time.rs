//! Julian day and sidereal time helpers.

use chrono::{DateTime, Utc};

/// Julian day of the Unix epoch (1970-01-01T00:00:00Z).
pub const UNIX_EPOCH_JD: f64 = 2440587.5;
/// Julian day of J2000.0 (2000-01-01T12:00:00 TT, treated as UTC here).
pub const J2000_JD: f64 = 2451545.0;
pub const DAYS_PER_CENTURY: f64 = 36525.0;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Convert a UTC instant to a Julian day number.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Julian centuries elapsed since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Greenwich mean sidereal time in degrees [0, 360).
///
/// Meeus, *Astronomical Algorithms*, eq. 12.4.
pub fn gmst_degrees(jd: f64) -> f64 {
    let t = julian_centuries(jd);
    let theta = 280.46061837 + 360.98564736629 * (jd - J2000_JD) + 0.000387933 * t * t
        - t * t * t / 38_710_000.0;
    theta.rem_euclid(360.0)
}

/// Local mean sidereal time in degrees [0, 360) for an east-positive longitude.
pub fn local_sidereal_degrees(jd: f64, longitude: f64) -> f64 {
    (gmst_degrees(jd) + longitude).rem_euclid(360.0)
}
