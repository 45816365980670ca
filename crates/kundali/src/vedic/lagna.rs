//! Lagna (ascendant) from observer geometry.
//!
//! `Asc = atan2(cos(RAMC), -(sin(RAMC)·cos(ε) + tan(φ)·sin(ε)))`
//! with RAMC the local sidereal time and ε a fixed mean obliquity.

use chrono::{DateTime, Utc};

use crate::ephemeris::time::{julian_day, local_sidereal_degrees};
use crate::error::KundaliError;
use crate::vedic::zodiac::normalize_degrees;

/// Mean obliquity of the ecliptic at J2000.0, degrees.
pub const OBLIQUITY_DEG: f64 = 23.4392911;

/// Above this latitude some signs never rise and the ascendant jumps.
pub const POLAR_CIRCLE_LATITUDE: f64 = 90.0 - OBLIQUITY_DEG;

/// Tropical ecliptic longitude of the ascendant from a precomputed RAMC.
pub fn ascendant_from_ramc(ramc_deg: f64, latitude: f64) -> f64 {
    let ramc = ramc_deg.to_radians();
    let eps = OBLIQUITY_DEG.to_radians();
    let phi = latitude.to_radians();

    let y = ramc.cos();
    let x = -(ramc.sin() * eps.cos() + phi.tan() * eps.sin());
    normalize_degrees(y.atan2(x).to_degrees())
}

/// Tropical ecliptic longitude of the ascendant, degrees [0, 360).
///
/// Near the poles `tan(φ)` grows without bound and the result degrades
/// rather than failing; beyond the polar circles the rising degree can skip
/// whole signs. Only a non-finite result is reported as an error.
pub fn ascendant_longitude(
    instant: DateTime<Utc>,
    latitude: f64,
    longitude: f64,
) -> Result<f64, KundaliError> {
    let jd = julian_day(instant);
    let ramc = local_sidereal_degrees(jd, longitude);
    if latitude.abs() > POLAR_CIRCLE_LATITUDE {
        log::warn!(
            "Latitude {:.4} is inside a polar circle; ascendant may skip signs",
            latitude
        );
    }
    let asc = ascendant_from_ramc(ramc, latitude);
    if !asc.is_finite() {
        return Err(KundaliError::computation(
            "ascendant",
            format!("non-finite ascendant for latitude {} (RAMC {:.4})", latitude, ramc),
        ));
    }
    log::debug!("RAMC {:.6} deg, ascendant {:.6} deg (tropical)", ramc, asc);
    Ok(asc)
}
