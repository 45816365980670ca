use chrono::{DateTime, Datelike, Timelike, Utc};
use std::env;
use std::path::PathBuf;
use swisseph::swe::{calc_ut, julday};

use crate::ephemeris::provider::{EphemerisError, EphemerisProvider};
use crate::ephemeris::types::{Body, EclipticPosition};

// Swiss Ephemeris planet numbers
const PLANET_IDS: &[(Body, i32)] = &[
    (Body::Sun, 0),
    (Body::Moon, 1),
    (Body::Mercury, 2),
    (Body::Venus, 3),
    (Body::Mars, 4),
    (Body::Jupiter, 5),
    (Body::Saturn, 6),
    (Body::Uranus, 7),
    (Body::Neptune, 8),
    (Body::Pluto, 9),
];

// FLG_SWIEPH / FLG_MOSEPH; tropical, geocentric, apparent
const SWIEPH_FLAGS: i32 = 2;
const MOSEPH_FLAGS: i32 = 4;

const DEFAULT_EPHEMERIS_PATH: &str = "/usr/local/share/swisseph";

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path.
    ///
    /// A path given here or in `SWISS_EPHEMERIS_PATH` must exist. Without
    /// either, the default data directory is used when present and the
    /// library's built-in Moshier theory otherwise.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let explicit = ephemeris_path.or_else(|| env::var_os("SWISS_EPHEMERIS_PATH").map(PathBuf::from));

        if let Some(path) = explicit {
            if !path.exists() {
                return Err(EphemerisError::FileNotFound {
                    path: path.display().to_string(),
                    message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                });
            }
            log::debug!("Swiss Ephemeris data path: {}", path.display());
            return Ok(Self::with_data(path));
        }

        let default_path = PathBuf::from(DEFAULT_EPHEMERIS_PATH);
        if default_path.exists() {
            log::debug!("Swiss Ephemeris data path: {}", default_path.display());
            return Ok(Self::with_data(default_path));
        }

        log::warn!(
            "No Swiss Ephemeris data at {}; using the built-in Moshier ephemeris",
            DEFAULT_EPHEMERIS_PATH
        );
        Ok(Self::moshier())
    }

    /// Adapter on the analytic Moshier ephemeris, which needs no data files.
    pub fn moshier() -> Self {
        Self {
            ephemeris_path: None,
            flags: MOSEPH_FLAGS,
        }
    }

    fn with_data(path: PathBuf) -> Self {
        Self {
            ephemeris_path: Some(path),
            flags: SWIEPH_FLAGS,
        }
    }

    pub fn ephemeris_path(&self) -> Option<&PathBuf> {
        self.ephemeris_path.as_ref()
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        if self.ephemeris_path.is_some() {
            "swisseph"
        } else {
            "swisseph-moshier"
        }
    }

    fn position_of(
        &self,
        body: Body,
        instant: DateTime<Utc>,
    ) -> Result<EclipticPosition, EphemerisError> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(b, _)| *b == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::UnsupportedBody {
                body: body.id().to_string(),
                provider: self.name().to_string(),
            })?;

        let jd = datetime_to_julian_day(instant);
        let result = calc_ut(jd, planet_code as u32, self.flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                body: body.id().to_string(),
                datetime: instant,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok(EclipticPosition {
            longitude: out[0].rem_euclid(360.0),
            latitude: out[1],
        })
    }
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal = dt.hour() as f64
        + dt.minute() as f64 / 60.0
        + (dt.second() as f64 + dt.nanosecond() as f64 / 1e9) / 3600.0;
    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}
