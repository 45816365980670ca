//! Nakshatra utilities for Vedic astrology.
//!
//! Nakshatras are 27 lunar mansions, each spanning 13°20' (360/27 degrees).
//! Each nakshatra is divided into 4 padas (quarters).

use serde::{Deserialize, Serialize};

use crate::ephemeris::Body;
use crate::vedic::zodiac::normalize_degrees;

pub const NAKSHATRA_COUNT: usize = 27;
pub const NAKSHATRA_SEGMENT_SIZE: f64 = 360.0 / 27.0;
pub const PADA_SIZE: f64 = NAKSHATRA_SEGMENT_SIZE / 4.0;

// (slug, display_name, ruling body)
pub const NAKSHATRA_ORDER: &[(&str, &str, Body)] = &[
    ("ashwini", "Ashwini", Body::Ketu),
    ("bharani", "Bharani", Body::Venus),
    ("krittika", "Krittika", Body::Sun),
    ("rohini", "Rohini", Body::Moon),
    ("mrigashira", "Mrigashira", Body::Mars),
    ("ardra", "Ardra", Body::Rahu),
    ("punarvasu", "Punarvasu", Body::Jupiter),
    ("pushya", "Pushya", Body::Saturn),
    ("ashlesha", "Ashlesha", Body::Mercury),
    ("magha", "Magha", Body::Ketu),
    ("purva_phalguni", "Purva Phalguni", Body::Venus),
    ("uttara_phalguni", "Uttara Phalguni", Body::Sun),
    ("hasta", "Hasta", Body::Moon),
    ("chitra", "Chitra", Body::Mars),
    ("swati", "Swati", Body::Rahu),
    ("vishakha", "Vishakha", Body::Jupiter),
    ("anuradha", "Anuradha", Body::Saturn),
    ("jyeshtha", "Jyeshtha", Body::Mercury),
    ("mula", "Mula", Body::Ketu),
    ("purva_ashadha", "Purva Ashadha", Body::Venus),
    ("uttara_ashadha", "Uttara Ashadha", Body::Sun),
    ("shravana", "Shravana", Body::Moon),
    ("dhanishta", "Dhanishta", Body::Mars),
    ("shatabhisha", "Shatabhisha", Body::Rahu),
    ("purva_bhadrapada", "Purva Bhadrapada", Body::Jupiter),
    ("uttara_bhadrapada", "Uttara Bhadrapada", Body::Saturn),
    ("revati", "Revati", Body::Mercury),
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseNakshatraRecord {
    pub id: String,
    pub name: String,
    pub lord: Body,
    pub start: f64,
    pub end: f64,
    pub index: usize,
}

/// Where a longitude falls inside its nakshatra.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NakshatraMetadata {
    #[serde(flatten)]
    pub base: BaseNakshatraRecord,
    /// Degrees travelled since the nakshatra start
    pub offset: f64,
    /// `offset` as a fraction of the nakshatra span, in [0, 1)
    pub progress: f64,
    pub pada: u8,
    pub pada_fraction: f64,
}

/// Name, ruling body and pada of a longitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NakshatraPlacement {
    pub name: String,
    #[serde(rename = "rulingBody")]
    pub ruling_body: Body,
    pub pada: u8,
    pub index: usize,
}

fn build_nakshatra_table() -> Vec<BaseNakshatraRecord> {
    NAKSHATRA_ORDER
        .iter()
        .enumerate()
        .map(|(idx, (slug, display_name, lord))| {
            let start = idx as f64 * NAKSHATRA_SEGMENT_SIZE;
            BaseNakshatraRecord {
                id: slug.to_string(),
                name: display_name.to_string(),
                lord: *lord,
                start,
                end: start + NAKSHATRA_SEGMENT_SIZE,
                index: idx,
            }
        })
        .collect()
}

lazy_static::lazy_static! {
    static ref NAKSHATRA_TABLE: Vec<BaseNakshatraRecord> = build_nakshatra_table();
}

/// The 27 nakshatra records in zodiacal order, starting at Ashwini.
pub fn nakshatra_table() -> &'static [BaseNakshatraRecord] {
    &NAKSHATRA_TABLE
}

/// Return metadata for the nakshatra containing the given longitude.
///
/// Returns a struct containing id, name, lord, index, start/end degrees,
/// within-nakshatra offset, pada number, and pada fraction.
pub fn get_nakshatra_for_longitude(longitude: f64) -> NakshatraMetadata {
    let lon = normalize_degrees(longitude);
    let index = ((lon / NAKSHATRA_SEGMENT_SIZE).floor() as usize).min(NAKSHATRA_COUNT - 1);
    let entry = &NAKSHATRA_TABLE[index];

    let offset = (lon - entry.start).max(0.0);
    let pada = ((offset / PADA_SIZE).floor() as u8).min(3) + 1;
    let pada_offset = offset - (pada - 1) as f64 * PADA_SIZE;

    NakshatraMetadata {
        base: entry.clone(),
        offset,
        progress: offset / NAKSHATRA_SEGMENT_SIZE,
        pada,
        pada_fraction: pada_offset / PADA_SIZE,
    }
}

/// Classify a longitude into its nakshatra and pada.
pub fn classify_nakshatra(longitude: f64) -> NakshatraPlacement {
    let meta = get_nakshatra_for_longitude(longitude);
    NakshatraPlacement {
        name: meta.base.name,
        ruling_body: meta.base.lord,
        pada: meta.pada,
        index: meta.base.index,
    }
}
