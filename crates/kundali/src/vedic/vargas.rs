//! Divisional chart (varga) helpers.
//!
//! Only the navamsa (D9) is derived. Each sign is cut into nine slices of
//! 3°20'; the first slice maps to the starting sign of the sign's element
//! (fire → Aries, earth → Capricorn, air → Libra, water → Cancer) and later
//! slices advance one sign each.

use crate::vedic::positions::classify_body;
use crate::vedic::types::{BodyPosition, HarmonicChart};
use crate::vedic::zodiac::{classify_sign, normalize_degrees, Element, Sign, SIGN_SPAN};

pub struct VargaSpec {
    pub id: &'static str,
    pub label: &'static str,
    pub division: u8,
}

pub const RASI: VargaSpec = VargaSpec {
    id: "d1",
    label: "Rasi",
    division: 1,
};

pub const NAVAMSA: VargaSpec = VargaSpec {
    id: "d9",
    label: "Navamsa",
    division: 9,
};

/// Sign the first navamsa slice of a sign of this element maps to.
pub fn navamsa_start_sign(element: Element) -> Sign {
    match element {
        Element::Fire => Sign::Aries,
        Element::Earth => Sign::Capricorn,
        Element::Air => Sign::Libra,
        Element::Water => Sign::Cancer,
    }
}

/// Navamsa sign index and the position within its slice, as a 0..1 fraction.
fn navamsa_slice(longitude: f64) -> (usize, f64) {
    let lon = normalize_degrees(longitude);
    let placement = classify_sign(lon);
    let sign_index = placement.sign_index;
    let slice = SIGN_SPAN / f64::from(NAVAMSA.division);
    let within_sign = lon - sign_index as f64 * SIGN_SPAN;
    let part = ((within_sign / slice).floor() as usize).min(NAVAMSA.division as usize - 1);
    let fraction = ((within_sign - part as f64 * slice) / slice).clamp(0.0, 1.0);
    let start = navamsa_start_sign(placement.sign.element()).index();
    ((start + part) % 12, fraction)
}

/// Navamsa sign index for a sidereal longitude.
pub fn navamsa_sign_index(longitude: f64) -> usize {
    navamsa_slice(longitude).0
}

/// Longitude projected into the navamsa chart: the D9 sign plus the
/// within-slice position scaled to a full sign.
pub fn navamsa_longitude(longitude: f64) -> f64 {
    let (sign_index, fraction) = navamsa_slice(longitude);
    normalize_degrees(sign_index as f64 * SIGN_SPAN + fraction * SIGN_SPAN)
}

/// Re-classify a base position in the navamsa chart. Latitude, speed and
/// retrograde status carry over unchanged.
pub fn navamsa_position(base: &BodyPosition, d9_ascendant_sign_index: usize) -> BodyPosition {
    classify_body(
        base.name,
        navamsa_longitude(base.sidereal_longitude),
        base.ecliptic_latitude,
        base.daily_speed,
        base.is_retrograde,
        d9_ascendant_sign_index,
    )
}

/// The base chart wrapped as a harmonic chart of division 1.
pub fn build_rasi_chart(ascendant: &BodyPosition, bodies: &[BodyPosition]) -> HarmonicChart {
    HarmonicChart {
        varga_id: RASI.id.to_string(),
        label: RASI.label.to_string(),
        division: RASI.division,
        ascendant: ascendant.clone(),
        bodies: bodies.to_vec(),
    }
}

/// Build the navamsa chart. Houses are counted from the navamsa ascendant.
pub fn build_navamsa_chart(ascendant: &BodyPosition, bodies: &[BodyPosition]) -> HarmonicChart {
    let d9_asc_sign = navamsa_sign_index(ascendant.sidereal_longitude);
    let d9_ascendant = navamsa_position(ascendant, d9_asc_sign);

    HarmonicChart {
        varga_id: NAVAMSA.id.to_string(),
        label: NAVAMSA.label.to_string(),
        division: NAVAMSA.division,
        ascendant: d9_ascendant,
        bodies: bodies
            .iter()
            .map(|b| navamsa_position(b, d9_asc_sign))
            .collect(),
    }
}
