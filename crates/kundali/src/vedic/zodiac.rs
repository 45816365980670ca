//! Zodiac signs, their rulers, and longitude normalization.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ephemeris::Body;

pub const SIGN_SPAN: f64 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Element {
    Fire,
    Earth,
    Air,
    Water,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

pub const SIGN_ORDER: [Sign; 12] = [
    Sign::Aries,
    Sign::Taurus,
    Sign::Gemini,
    Sign::Cancer,
    Sign::Leo,
    Sign::Virgo,
    Sign::Libra,
    Sign::Scorpio,
    Sign::Sagittarius,
    Sign::Capricorn,
    Sign::Aquarius,
    Sign::Pisces,
];

// Aries -> Pisces lords
const SIGN_RULERS: [Body; 12] = [
    Body::Mars,
    Body::Venus,
    Body::Mercury,
    Body::Moon,
    Body::Sun,
    Body::Mercury,
    Body::Venus,
    Body::Mars,
    Body::Jupiter,
    Body::Saturn,
    Body::Saturn,
    Body::Jupiter,
];

impl Sign {
    /// Sign at a zodiacal index; wraps modulo 12.
    pub fn from_index(index: usize) -> Sign {
        SIGN_ORDER[index % 12]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn ruler(self) -> Body {
        SIGN_RULERS[self.index()]
    }

    /// Fire, earth, air, water repeat in that order from Aries.
    pub fn element(self) -> Element {
        match self.index() % 4 {
            0 => Element::Fire,
            1 => Element::Earth,
            2 => Element::Air,
            _ => Element::Water,
        }
    }

    pub fn start_degree(self) -> f64 {
        self.index() as f64 * SIGN_SPAN
    }

    pub fn name(self) -> &'static str {
        match self {
            Sign::Aries => "Aries",
            Sign::Taurus => "Taurus",
            Sign::Gemini => "Gemini",
            Sign::Cancer => "Cancer",
            Sign::Leo => "Leo",
            Sign::Virgo => "Virgo",
            Sign::Libra => "Libra",
            Sign::Scorpio => "Scorpio",
            Sign::Sagittarius => "Sagittarius",
            Sign::Capricorn => "Capricorn",
            Sign::Aquarius => "Aquarius",
            Sign::Pisces => "Pisces",
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignPlacement {
    pub sign: Sign,
    pub ruler: Body,
    #[serde(rename = "signIndex")]
    pub sign_index: usize,
}

/// Normalize degrees to [0, 360).
pub fn normalize_degrees(value: f64) -> f64 {
    let normalized = value.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360.0
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Sign occupied by a longitude, after normalization.
pub fn classify_sign(longitude: f64) -> SignPlacement {
    let lon = normalize_degrees(longitude);
    let sign_index = ((lon / SIGN_SPAN).floor() as usize).min(11);
    let sign = Sign::from_index(sign_index);
    SignPlacement {
        sign,
        ruler: sign.ruler(),
        sign_index,
    }
}

/// Whole-sign house of `sign_index` counted from the ascendant's sign (1..=12).
pub fn house_from(sign_index: usize, ascendant_sign_index: usize) -> u8 {
    ((sign_index % 12 + 12 - ascendant_sign_index % 12) % 12 + 1) as u8
}
