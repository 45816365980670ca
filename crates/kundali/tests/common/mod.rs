#![allow(dead_code)]

use chrono::{DateTime, TimeZone, Utc};
use kundali::ephemeris::time::{julian_day, J2000_JD};
use kundali::ephemeris::{Body, EclipticPosition, EphemerisError, EphemerisProvider};
use kundali::BirthDetails;

/// Deterministic provider: each body moves linearly from a fixed J2000
/// longitude. Mercury runs backwards so retrograde handling is exercised.
pub struct FixtureEphemeris {
    pub unavailable: Vec<Body>,
}

impl FixtureEphemeris {
    pub fn new() -> Self {
        FixtureEphemeris { unavailable: Vec::new() }
    }

    pub fn without(bodies: &[Body]) -> Self {
        FixtureEphemeris { unavailable: bodies.to_vec() }
    }

    fn motion(body: Body) -> Option<(f64, f64)> {
        match body {
            Body::Sun => Some((280.0, 0.9856)),
            Body::Moon => Some((218.0, 13.1764)),
            Body::Mercury => Some((271.0, -0.4)),
            Body::Venus => Some((241.0, 1.2)),
            Body::Mars => Some((327.0, 0.524)),
            Body::Jupiter => Some((34.0, 0.083)),
            Body::Saturn => Some((40.0, 0.0335)),
            Body::Uranus => Some((314.0, 0.0117)),
            Body::Neptune => Some((303.0, 0.006)),
            Body::Pluto => Some((251.0, 0.004)),
            _ => None,
        }
    }
}

impl EphemerisProvider for FixtureEphemeris {
    fn name(&self) -> &str {
        "fixture"
    }

    fn position_of(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        let unsupported = || EphemerisError::UnsupportedBody {
            body: body.id().to_string(),
            provider: "fixture".to_string(),
        };
        if self.unavailable.contains(&body) {
            return Err(unsupported());
        }
        let (base, rate) = Self::motion(body).ok_or_else(unsupported)?;
        let days = julian_day(instant) - J2000_JD;
        Ok(EclipticPosition {
            longitude: (base + rate * days).rem_euclid(360.0),
            latitude: 0.5,
        })
    }
}

/// New Delhi, 1990-01-01 00:00 local (UTC+5:30).
pub fn new_delhi_1990() -> BirthDetails {
    BirthDetails::new("1990-01-01", "00:00", 28.6139, 77.2090, 5.5)
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}
