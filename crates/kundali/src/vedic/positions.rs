//! Sidereal position assembly for each tracked body.

use chrono::{DateTime, Duration, Utc};

use crate::ephemeris::{Body, BodySource, EclipticPosition, EphemerisError, EphemerisProvider};
use crate::error::KundaliError;
use crate::vedic::nakshatra::classify_nakshatra;
use crate::vedic::nodes::{node_longitude, MEAN_NODE_DAILY_SPEED};
use crate::vedic::types::{BodyPosition, MissingBody};
use crate::vedic::zodiac::{classify_sign, house_from, normalize_degrees};

/// Per-chart values every body is classified against.
#[derive(Debug, Clone, Copy)]
pub struct PositionContext {
    pub instant: DateTime<Utc>,
    pub julian_day: f64,
    pub ayanamsa: f64,
    pub ascendant_sign_index: usize,
    /// Step of the forward difference used for daily speed
    pub speed_step: Duration,
}

/// Bodies that were placed, plus the ones that could not be.
#[derive(Debug, Clone, Default)]
pub struct AssembledPositions {
    pub bodies: Vec<BodyPosition>,
    pub missing: Vec<MissingBody>,
}

/// Build a classified position from a sidereal longitude.
pub fn classify_body(
    name: Body,
    sidereal_longitude: f64,
    latitude: f64,
    daily_speed: f64,
    is_retrograde: bool,
    ascendant_sign_index: usize,
) -> BodyPosition {
    let lon = normalize_degrees(sidereal_longitude);
    let sign = classify_sign(lon);
    let nakshatra = classify_nakshatra(lon);
    BodyPosition {
        name,
        sidereal_longitude: lon,
        ecliptic_latitude: latitude,
        daily_speed,
        sign: sign.sign,
        sign_ruling_body: sign.ruler,
        nakshatra_name: nakshatra.name,
        nakshatra_ruling_body: nakshatra.ruling_body,
        pada_index: nakshatra.pada,
        house_number: house_from(sign.sign_index, ascendant_sign_index),
        is_retrograde,
    }
}

/// The ascendant as a zeroth body, fixed to house 1.
pub fn ascendant_position(sidereal_longitude: f64) -> BodyPosition {
    let sign_index = classify_sign(sidereal_longitude).sign_index;
    classify_body(Body::Ascendant, sidereal_longitude, 0.0, 0.0, false, sign_index)
}

/// Forward-difference daily speed with shortest-path wraparound.
pub fn finite_difference_speed(lon_now: f64, lon_next: f64, step: Duration) -> f64 {
    let mut delta = lon_next - lon_now;
    if delta < -180.0 {
        delta += 360.0;
    }
    if delta > 180.0 {
        delta -= 360.0;
    }
    let step_days = step.num_milliseconds() as f64 / 86_400_000.0;
    delta / step_days
}

/// Tropical position, daily speed and retrograde flag for one source.
fn sample(
    provider: &dyn EphemerisProvider,
    source: BodySource,
    ctx: &PositionContext,
) -> Result<(EclipticPosition, f64, bool), EphemerisError> {
    match source {
        BodySource::MeanNode(kind) => {
            let pos = EclipticPosition {
                longitude: node_longitude(kind, ctx.julian_day),
                latitude: 0.0,
            };
            Ok((pos, MEAN_NODE_DAILY_SPEED, true))
        }
        BodySource::Ephemeris(body) => {
            let now = provider.position_of(body, ctx.instant)?;
            let next = provider.position_of(body, ctx.instant + ctx.speed_step)?;
            let speed = finite_difference_speed(now.longitude, next.longitude, ctx.speed_step);
            Ok((now, speed, speed < 0.0))
        }
    }
}

/// Place every requested body in the sidereal zodiac.
///
/// A body the provider cannot resolve is recorded in `missing` and left out
/// of `bodies`. With `strict` set the first such failure aborts instead.
pub fn assemble_positions(
    provider: &dyn EphemerisProvider,
    tracked: &[Body],
    ctx: &PositionContext,
    strict: bool,
) -> Result<AssembledPositions, KundaliError> {
    let mut assembled = AssembledPositions::default();

    for &body in tracked {
        let Some(source) = body.source() else {
            continue;
        };
        match sample(provider, source, ctx) {
            Ok((tropical, speed, retrograde)) => {
                let sidereal = normalize_degrees(tropical.longitude - ctx.ayanamsa);
                assembled.bodies.push(classify_body(
                    body,
                    sidereal,
                    tropical.latitude,
                    speed,
                    retrograde,
                    ctx.ascendant_sign_index,
                ));
            }
            Err(err) if strict => {
                return Err(KundaliError::EphemerisUnavailable {
                    body: body.id().to_string(),
                    stage: "position assembly".to_string(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                log::warn!("Dropping {} from chart: {}", body, err);
                assembled.missing.push(MissingBody {
                    body,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(assembled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vedic::zodiac::Sign;

    #[test]
    fn test_speed_wraps_across_zero() {
        let step = Duration::hours(1);
        let speed = finite_difference_speed(359.9, 0.1, step);
        assert!((speed - 4.8).abs() < 1e-9);
        let back = finite_difference_speed(0.1, 359.9, step);
        assert!((back + 4.8).abs() < 1e-9);
    }

    #[test]
    fn test_classify_body_house() {
        // Ascendant in Cancer (3), body in Scorpio (7) -> 5th house
        let pos = classify_body(Body::Mars, 215.0, 1.2, 0.6, false, 3);
        assert_eq!(pos.sign, Sign::Scorpio);
        assert_eq!(pos.house_number, 5);
        assert_eq!(pos.sign_ruling_body, Body::Mars);
        assert_eq!(pos.nakshatra_name, "Anuradha");
    }

    #[test]
    fn test_ascendant_in_first_house() {
        let asc = ascendant_position(301.5);
        assert_eq!(asc.name, Body::Ascendant);
        assert_eq!(asc.house_number, 1);
        assert_eq!(asc.sign, Sign::Aquarius);
        assert!(!asc.is_retrograde);
    }
}
