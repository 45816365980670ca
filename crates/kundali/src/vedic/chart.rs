//! Chart assembly: from a birth record to a complete kundali.

use chrono::Duration;

use crate::ephemeris::time::julian_day;
use crate::ephemeris::{Body, EphemerisProvider, SwissEphemerisAdapter, CLASSICAL_BODIES, OUTER_BODIES};
use crate::error::KundaliError;
use crate::input::BirthDetails;
use crate::settings::{EngineSettings, EphemerisConfig};
use crate::vedic::dashas::{compute_vimshottari, DashaTimeline};
use crate::vedic::houses::build_houses;
use crate::vedic::lagna::ascendant_longitude;
use crate::vedic::positions::{ascendant_position, assemble_positions, PositionContext};
use crate::vedic::types::{HarmonicCharts, KundaliResult};
use crate::vedic::vargas::{build_navamsa_chart, build_rasi_chart};
use crate::vedic::zodiac::normalize_degrees;

/// Bodies tracked under the given settings, in chart order.
pub fn tracked_bodies(settings: &EngineSettings) -> Vec<Body> {
    let mut bodies = CLASSICAL_BODIES.to_vec();
    if settings.include_outer_bodies {
        bodies.extend_from_slice(OUTER_BODIES);
    }
    bodies
}

/// Compute a full chart for one birth record.
pub fn compute_kundali(
    details: &BirthDetails,
    provider: &dyn EphemerisProvider,
    settings: &EngineSettings,
) -> Result<KundaliResult, KundaliError> {
    let instant = details.utc_instant()?;
    let jd = julian_day(instant);
    let ayanamsa = settings.ayanamsa.value_at(instant);
    log::debug!(
        "JD {:.6}, {} ayanamsa {:.6} deg",
        jd,
        settings.ayanamsa.display_name(),
        ayanamsa
    );

    let tropical_asc = ascendant_longitude(instant, details.latitude, details.longitude)?;
    let ascendant = ascendant_position(normalize_degrees(tropical_asc - ayanamsa));
    let ascendant_sign_index = ascendant.sign.index();

    let ctx = PositionContext {
        instant,
        julian_day: jd,
        ayanamsa,
        ascendant_sign_index,
        speed_step: Duration::minutes(i64::from(settings.speed_step_minutes.max(1))),
    };
    let assembled = assemble_positions(
        provider,
        &tracked_bodies(settings),
        &ctx,
        settings.strict_ephemeris,
    )?;
    let bodies = assembled.bodies;

    let houses = build_houses(ascendant_sign_index, &bodies);
    let harmonic_charts = HarmonicCharts {
        base: build_rasi_chart(&ascendant, &bodies),
        ninth_harmonic: build_navamsa_chart(&ascendant, &bodies),
    };

    let dasha_timeline = match bodies.iter().find(|b| b.name == Body::Moon) {
        Some(moon) => compute_vimshottari(
            moon.sidereal_longitude,
            instant,
            settings.dasha_horizon_years,
            settings.dasha_depth,
        )?,
        None => {
            log::warn!("Moon unavailable; dasha timeline left empty");
            DashaTimeline::empty(instant, settings.dasha_depth)
        }
    };

    log::info!(
        "Chart for {} {} (UTC {}): ascendant {} {:.4}, {} bodies, {} missing, ephemeris {}",
        details.date_string,
        details.time_string,
        instant,
        ascendant.sign,
        ascendant.sidereal_longitude,
        bodies.len(),
        assembled.missing.len(),
        provider.name()
    );

    Ok(KundaliResult {
        birth_details: details.clone(),
        utc_instant: instant,
        julian_day: jd,
        ayanamsa_value: ayanamsa,
        ayanamsa_model_name: settings.ayanamsa.display_name().to_string(),
        ephemeris: provider.name().to_string(),
        ascendant,
        bodies,
        houses,
        harmonic_charts,
        dasha_timeline,
        missing_bodies: assembled.missing,
    })
}

/// An ephemeris provider bound to a set of engine settings.
pub struct KundaliEngine {
    provider: Box<dyn EphemerisProvider>,
    settings: EngineSettings,
}

impl KundaliEngine {
    pub fn new(provider: Box<dyn EphemerisProvider>, settings: EngineSettings) -> Self {
        KundaliEngine { provider, settings }
    }

    /// Engine on the Swiss Ephemeris, using the data path in `config`.
    pub fn from_config(config: &EphemerisConfig, settings: EngineSettings) -> Result<Self, KundaliError> {
        let adapter = SwissEphemerisAdapter::new(config.path.clone())?;
        Ok(Self::new(Box::new(adapter), settings))
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub fn compute(&self, details: &BirthDetails) -> Result<KundaliResult, KundaliError> {
        compute_kundali(details, self.provider.as_ref(), &self.settings)
    }
}
