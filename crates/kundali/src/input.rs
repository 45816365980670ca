//! Birth record parsing and validation.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::KundaliError;

/// Largest timezone offset accepted, in hours either side of UTC.
pub const MAX_TZ_OFFSET_HOURS: f64 = 14.0;

/// A local birth date and time with the birthplace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDetails {
    /// `YYYY-MM-DD`
    #[serde(alias = "date")]
    pub date_string: String,
    /// `HH:mm` or `HH:mm:ss`, local time
    #[serde(alias = "time")]
    pub time_string: String,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(alias = "lon")]
    pub longitude: f64,
    /// Local time minus UTC, in (possibly fractional) hours
    #[serde(alias = "timezone")]
    pub timezone_offset_hours: f64,
}

impl BirthDetails {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        latitude: f64,
        longitude: f64,
        timezone_offset_hours: f64,
    ) -> Self {
        BirthDetails {
            date_string: date.into(),
            time_string: time.into(),
            latitude,
            longitude,
            timezone_offset_hours,
        }
    }

    /// Check coordinate and offset ranges.
    pub fn validate(&self) -> Result<(), KundaliError> {
        check_range("latitude", self.latitude, 90.0)?;
        check_range("longitude", self.longitude, 180.0)?;
        check_range("timezoneOffsetHours", self.timezone_offset_hours, MAX_TZ_OFFSET_HOURS)?;
        Ok(())
    }

    /// The birth moment in UTC: local time minus the offset.
    pub fn utc_instant(&self) -> Result<DateTime<Utc>, KundaliError> {
        self.validate()?;
        let local = NaiveDateTime::new(parse_date(&self.date_string)?, parse_time(&self.time_string)?);
        let offset = Duration::milliseconds((self.timezone_offset_hours * 3_600_000.0).round() as i64);
        let utc = local.checked_sub_signed(offset).ok_or_else(|| {
            KundaliError::invalid_input("dateString", format!("'{}' is out of range", self.date_string))
        })?;
        Ok(Utc.from_utc_datetime(&utc))
    }
}

fn check_range(field: &str, value: f64, limit: f64) -> Result<(), KundaliError> {
    if !value.is_finite() || value.abs() > limit {
        return Err(KundaliError::invalid_input(
            field,
            format!("{} is outside [-{}, {}]", value, limit, limit),
        ));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` date with a four-digit year.
pub fn parse_date(text: &str) -> Result<NaiveDate, KundaliError> {
    let trimmed = text.trim();
    let well_formed = trimmed.len() == 10
        && trimmed.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return Err(KundaliError::invalid_input(
            "dateString",
            format!("'{}' is not YYYY-MM-DD", text),
        ));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|e| {
        KundaliError::invalid_input("dateString", format!("'{}' is not YYYY-MM-DD: {}", text, e))
    })
}

pub fn parse_time(text: &str) -> Result<NaiveTime, KundaliError> {
    let trimmed = text.trim();
    NaiveTime::parse_from_str(trimmed, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(trimmed, "%H:%M"))
        .map_err(|e| {
            KundaliError::invalid_input("timeString", format!("'{}' is not HH:mm[:ss]: {}", text, e))
        })
}

/// Parse a UTC offset label into hours.
///
/// Accepts `+05:30`, `-0800`, `5.5`, `GMT-5`, `UTC+5:45` and a bare
/// `UTC`/`GMT`/`Z` for zero.
pub fn parse_utc_offset(text: &str) -> Result<f64, KundaliError> {
    let invalid = || KundaliError::invalid_input("utcOffset", format!("cannot parse '{}'", text));

    let upper = text.trim().to_uppercase();
    let rest = upper
        .strip_prefix("UTC")
        .or_else(|| upper.strip_prefix("GMT"))
        .unwrap_or(&upper)
        .trim();
    if rest.is_empty() || rest == "Z" {
        return Ok(0.0);
    }

    let (sign, digits) = match rest.as_bytes()[0] {
        b'+' => (1.0, &rest[1..]),
        b'-' => (-1.0, &rest[1..]),
        _ => (1.0, rest),
    };

    let is_number = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    let hours = if let Some((h, m)) = digits.split_once(':') {
        if !is_number(h) || !is_number(m) {
            return Err(invalid());
        }
        let h: f64 = h.parse().map_err(|_| invalid())?;
        let m: f64 = m.parse().map_err(|_| invalid())?;
        if m >= 60.0 {
            return Err(invalid());
        }
        h + m / 60.0
    } else if digits.len() == 4 && digits.bytes().all(|b| b.is_ascii_digit()) {
        let h: f64 = digits[..2].parse().map_err(|_| invalid())?;
        let m: f64 = digits[2..].parse().map_err(|_| invalid())?;
        h + m / 60.0
    } else {
        let decimal = digits.split_once('.').map_or(is_number(digits), |(whole, frac)| {
            is_number(whole) && is_number(frac)
        });
        if !decimal {
            return Err(invalid());
        }
        digits.parse::<f64>().map_err(|_| invalid())?
    };

    let value = sign * hours;
    check_range("utcOffset", value, MAX_TZ_OFFSET_HOURS)?;
    Ok(value)
}
