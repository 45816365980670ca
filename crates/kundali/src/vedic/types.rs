//! Chart output structures.
//!
//! Every structure here serializes to a plain tree: primitives, strings,
//! lists and records. The JSON is what downstream consumers (including the
//! narration layer) receive.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::ephemeris::Body;
use crate::input::BirthDetails;
use crate::vedic::dashas::DashaTimeline;
use crate::vedic::zodiac::Sign;

/// A classified body in one chart (base or harmonic).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyPosition {
    pub name: Body,
    /// Sidereal longitude, degrees [0, 360)
    pub sidereal_longitude: f64,
    pub ecliptic_latitude: f64,
    /// Degrees per day; negative while retrograde
    pub daily_speed: f64,
    pub sign: Sign,
    pub sign_ruling_body: Body,
    pub nakshatra_name: String,
    pub nakshatra_ruling_body: Body,
    pub pada_index: u8,
    pub house_number: u8,
    pub is_retrograde: bool,
}

/// One whole-sign house.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseSlot {
    pub sign_occupying: Sign,
    pub sign_ruling_body: Body,
    pub start_degree: f64,
    pub end_degree: f64,
    /// Bodies in the order they were computed
    pub occupying_bodies: Vec<Body>,
}

/// Houses keyed 1..=12.
pub type HouseMap = BTreeMap<u8, HouseSlot>;

/// A divisional chart.
///
/// In the navamsa (D9) chart every position, the ascendant included, is
/// projected: `sidereal_longitude` is the D9 sign start plus the position
/// within the 3°20' slice scaled to 30°, and the sign, nakshatra, pada and
/// house are classified from that projected longitude. They are not the
/// natal nakshatra and pada. Latitude, speed and retrograde status are
/// natal values. For the D1 chart all fields are the natal positions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonicChart {
    pub varga_id: String,
    pub label: String,
    pub division: u8,
    pub ascendant: BodyPosition,
    pub bodies: Vec<BodyPosition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HarmonicCharts {
    pub base: HarmonicChart,
    pub ninth_harmonic: HarmonicChart,
}

/// A tracked body the ephemeris could not resolve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingBody {
    pub body: Body,
    pub reason: String,
}

/// Complete chart for one birth record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KundaliResult {
    pub birth_details: BirthDetails,
    pub utc_instant: DateTime<Utc>,
    pub julian_day: f64,
    pub ayanamsa_value: f64,
    pub ayanamsa_model_name: String,
    pub ephemeris: String,
    pub ascendant: BodyPosition,
    pub bodies: Vec<BodyPosition>,
    pub houses: HouseMap,
    pub harmonic_charts: HarmonicCharts,
    pub dasha_timeline: DashaTimeline,
    /// Bodies dropped because the ephemeris could not resolve them
    pub missing_bodies: Vec<MissingBody>,
}

impl KundaliResult {
    pub fn body(&self, name: Body) -> Option<&BodyPosition> {
        self.bodies.iter().find(|b| b.name == name)
    }
}
